//! Boolean union of two shapes.

use crate::bounds::BoundingBox;
use crate::integrate::{integrate, IntegratorConfig, VolumeCache, VolumeEstimate};
use crate::shape::{Shape, ShapeKind};
use rdme_core::{GeometryError, Point, SiteType};

/// The set of points inside either child.
///
/// Owns both children exclusively. The bounding box is the join of the
/// children's boxes, computed once at construction.
///
/// # Shape containment is approximate
///
/// [`contains_shape`](Shape::contains_shape) reports `true` only when a
/// single child contains the whole query. A query that straddles both
/// children and is covered only by their combination is reported as not
/// contained. A `true` answer is always correct; a `false` answer is
/// only conclusive when the bounding boxes do not overlap. Callers that
/// need an exact answer for straddling queries should test sample points
/// with [`contains_point`](Shape::contains_point) instead.
///
/// # Examples
///
/// ```
/// use rdme_geometry::{Cuboid, Shape, Union};
/// use rdme_core::SiteType;
///
/// let left = Cuboid::new([0.0; 3], [1.0; 3], SiteType(1)).unwrap();
/// let right = Cuboid::new([1.0, 0.0, 0.0], [2.0, 1.0, 1.0], SiteType(1)).unwrap();
/// let both = Union::new(Box::new(left), Box::new(right), SiteType(2));
///
/// assert!(both.contains_point(&[1.5, 0.5, 0.5]));
/// assert_eq!(both.bounding_box().max(), [2.0, 1.0, 1.0]);
///
/// // Straddles both halves: covered, but no single child covers it.
/// let bridge = Cuboid::new([0.5, 0.2, 0.2], [1.5, 0.8, 0.8], SiteType(0)).unwrap();
/// assert!(!both.contains_shape(&bridge));
/// ```
#[derive(Debug)]
pub struct Union {
    first: Box<dyn Shape>,
    second: Box<dyn Shape>,
    site_type: SiteType,
    bbox: BoundingBox,
    integrator: IntegratorConfig,
    volume: VolumeCache,
}

impl Union {
    /// Combine two shapes, painting `site_type` where the union wins.
    pub fn new(first: Box<dyn Shape>, second: Box<dyn Shape>, site_type: SiteType) -> Self {
        let bbox = first.bounding_box().join_with(second.bounding_box());
        Self {
            first,
            second,
            site_type,
            bbox,
            integrator: IntegratorConfig::default(),
            volume: VolumeCache::new(),
        }
    }

    /// Replace the Monte-Carlo settings used by [`volume`](Shape::volume).
    pub fn with_integrator(mut self, config: IntegratorConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        self.integrator = config;
        Ok(self)
    }

    /// The first child.
    pub fn first(&self) -> &dyn Shape {
        self.first.as_ref()
    }

    /// The second child.
    pub fn second(&self) -> &dyn Shape {
        self.second.as_ref()
    }
}

impl Shape for Union {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Union
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.first.contains_point(p) || self.second.contains_point(p)
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.contains_shape(query) || self.second.contains_shape(query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.intersects(query) || self.second.intersects(query)
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
    use crate::integrate::Convergence;
    use crate::{Cuboid, Sphere};

    fn cube_at(x: f64) -> Box<dyn Shape> {
        Box::new(Cuboid::new([x, 0.0, 0.0], [x + 1.0, 1.0, 1.0], SiteType(1)).unwrap())
    }

    fn fast() -> IntegratorConfig {
        IntegratorConfig {
            threshold: 1e-4,
            batch_size: 4096,
            min_samples: 1 << 17,
            max_samples: 1 << 22,
            seed: 11,
            workers: Some(2),
        }
    }

    #[test]
    fn bounding_box_is_join_of_children() {
        let u = Union::new(cube_at(0.0), cube_at(4.0), SiteType(2));
        let expected = u.first().bounding_box().join_with(u.second().bounding_box());
        assert_eq!(*u.bounding_box(), expected);
        assert_eq!(u.site_type(), SiteType(2));
    }

    #[test]
    fn point_containment_is_logical_or() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2));
        assert!(u.contains_point(&[0.5, 0.5, 0.5]));
        assert!(u.contains_point(&[2.5, 0.5, 0.5]));
        // In the joined box but in the gap between children.
        assert!(!u.contains_point(&[1.5, 0.5, 0.5]));
    }

    #[test]
    fn intersects_rejects_on_bounding_box() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2));
        let far = Sphere::new([10.0, 10.0, 10.0], 1.0, SiteType(0)).unwrap();
        let in_gap = Cuboid::new([1.2, 0.2, 0.2], [1.8, 0.8, 0.8], SiteType(0)).unwrap();
        let touching_second = Sphere::new([3.5, 0.5, 0.5], 0.75, SiteType(0)).unwrap();
        assert!(!u.intersects(&far));
        assert!(!u.intersects(&in_gap));
        assert!(u.intersects(&touching_second));
    }

    #[test]
    fn contains_shape_when_one_child_suffices() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2));
        let inside_first = Sphere::new([0.5, 0.5, 0.5], 0.25, SiteType(0)).unwrap();
        assert!(u.contains_shape(&inside_first));
    }

    #[test]
    fn straddling_query_is_a_false_negative() {
        let u = Union::new(cube_at(0.0), cube_at(1.0), SiteType(2));
        let bridge = Cuboid::new([0.5, 0.2, 0.2], [1.5, 0.8, 0.8], SiteType(0)).unwrap();
        for c in bridge.bounding_box().corners() {
            assert!(u.contains_point(&c));
        }
        assert!(!u.contains_shape(&bridge));
    }

    #[test]
    fn primitive_delegates_to_composite_query() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2));
        let in_gap = Sphere::new([1.5, 0.5, 0.5], 0.2, SiteType(0)).unwrap();
        assert!(!in_gap.intersects(&u));
        let outer = Cuboid::new([0.0; 3], [3.0, 1.0, 1.0], SiteType(0)).unwrap();
        assert!(outer.intersects(&u));
        assert!(outer.contains_shape(&u));
    }

    // ── Volume ──────────────────────────────────────────────────

    #[test]
    fn disjoint_unit_cubes_have_volume_two() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2))
            .with_integrator(fast())
            .unwrap();
        let est = u.volume_estimate(false);
        assert_eq!(est.status, Convergence::Converged);
        assert!((est.volume - 2.0).abs() < 0.03, "{est:?}");
    }

    #[test]
    fn cached_volume_is_identical() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2))
            .with_integrator(fast())
            .unwrap();
        let a = u.volume(false);
        let b = u.volume(false);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn reintegration_resamples_within_band() {
        let u = Union::new(cube_at(0.0), cube_at(2.0), SiteType(2))
            .with_integrator(fast())
            .unwrap();
        let a = u.volume(true);
        let b = u.volume(true);
        assert!((a - 2.0).abs() < 0.03);
        assert!((b - 2.0).abs() < 0.03);
        assert_eq!(u.volume(false).to_bits(), b.to_bits());
    }

    #[test]
    fn rejects_invalid_integrator() {
        let bad = IntegratorConfig {
            batch_size: 0,
            ..IntegratorConfig::default()
        };
        assert!(Union::new(cube_at(0.0), cube_at(2.0), SiteType(2))
            .with_integrator(bad)
            .is_err());
    }

    #[test]
    fn compliance_union() {
        let a = Sphere::new([0.0; 3], 1.0, SiteType(1)).unwrap();
        let b = Cuboid::new([0.5, -0.5, -0.5], [2.0, 0.5, 0.5], SiteType(1)).unwrap();
        let u = Union::new(Box::new(a), Box::new(b), SiteType(2));
        compliance::run_composite_compliance(&u);
    }
}
