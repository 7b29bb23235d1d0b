//! Flat n-ary union.

use crate::bounds::BoundingBox;
use crate::integrate::{integrate, IntegratorConfig, VolumeCache, VolumeEstimate};
use crate::shape::{Shape, ShapeKind};
use rdme_core::{GeometryError, Point, SiteType};

/// Union of any non-empty number of shapes.
///
/// Equivalent to a left fold of [`Union`](crate::Union) over the members,
/// without the intermediate nodes. Shares the union's straddling caveat:
/// a query covered only by several members together is not contained.
#[derive(Debug)]
pub struct UnionSet {
    members: Vec<Box<dyn Shape>>,
    site_type: SiteType,
    bbox: BoundingBox,
    integrator: IntegratorConfig,
    volume: VolumeCache,
}

impl UnionSet {
    /// Combine `members`; returns `Err(GeometryError::EmptyUnionSet)` if there are none.
    pub fn new(members: Vec<Box<dyn Shape>>, site_type: SiteType) -> Result<Self, GeometryError> {
        let (head, tail) = members
            .split_first()
            .ok_or(GeometryError::EmptyUnionSet)?;
        let bbox = tail
            .iter()
            .fold(*head.bounding_box(), |acc, s| acc.join_with(s.bounding_box()));
        Ok(Self {
            members,
            site_type,
            bbox,
            integrator: IntegratorConfig::default(),
            volume: VolumeCache::new(),
        })
    }

    /// Replace the Monte-Carlo settings used by [`volume`](Shape::volume).
    pub fn with_integrator(mut self, config: IntegratorConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        self.integrator = config;
        Ok(self)
    }

    /// The member shapes, in construction order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = &dyn Shape> + '_ {
        self.members.iter().map(|m| m.as_ref())
    }
}

impl Shape for UnionSet {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::UnionSet
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.members.iter().any(|m| m.contains_point(p))
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        self.bounding_boxes_intersect(query)
            && self.members.iter().any(|m| m.contains_shape(query))
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        self.bounding_boxes_intersect(query) && self.members.iter().any(|m| m.intersects(query))
    }

    fn volume_estimate(&self, reintegrate: bool) -> VolumeEstimate {
        self.volume.get_or_integrate(reintegrate, |run| {
            integrate(self, &self.integrator.reseeded(run))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::{Cuboid, Sphere, Union};

    fn beads() -> Vec<Box<dyn Shape>> {
        (0..4)
            .map(|i| {
                Box::new(Sphere::new([i as f64 * 3.0, 0.0, 0.0], 1.0, SiteType(1)).unwrap())
                    as Box<dyn Shape>
            })
            .collect()
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            UnionSet::new(Vec::new(), SiteType(1)).unwrap_err(),
            GeometryError::EmptyUnionSet
        );
    }

    #[test]
    fn bounding_box_spans_all_members() {
        let set = UnionSet::new(beads(), SiteType(2)).unwrap();
        assert_eq!(set.bounding_box().min(), [-1.0, -1.0, -1.0]);
        assert_eq!(set.bounding_box().max(), [10.0, 1.0, 1.0]);
        assert_eq!(set.members().len(), 4);
    }

    #[test]
    fn matches_nested_unions_pointwise() {
        let set = UnionSet::new(beads(), SiteType(2)).unwrap();
        let nested = beads()
            .into_iter()
            .reduce(|acc, s| Box::new(Union::new(acc, s, SiteType(2))) as Box<dyn Shape>)
            .unwrap();
        assert_eq!(set.bounding_box(), nested.bounding_box());
        for i in 0..=110 {
            let p = [i as f64 * 0.1 - 0.5, 0.3, -0.2];
            assert_eq!(set.contains_point(&p), nested.contains_point(&p), "{p:?}");
        }
    }

    #[test]
    fn intersects_any_member() {
        let set = UnionSet::new(beads(), SiteType(2)).unwrap();
        let between = Cuboid::new([1.2, -0.2, -0.2], [1.8, 0.2, 0.2], SiteType(0)).unwrap();
        let touching = Cuboid::new([8.5, -0.2, -0.2], [8.8, 0.2, 0.2], SiteType(0)).unwrap();
        assert!(!set.intersects(&between));
        assert!(set.intersects(&touching));
        assert!(set.contains_shape(&touching));
    }

    #[test]
    fn compliance_union_set() {
        let set = UnionSet::new(beads(), SiteType(2)).unwrap();
        compliance::run_composite_compliance(&set);
    }
}
