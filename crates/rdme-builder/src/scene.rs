//! Named, ordered simulation regions.

use crate::error::BuildError;
use crate::packing::{pack_spheres, PackingStats, SpherePacking};
use indexmap::IndexMap;
use rdme_geometry::{BoundingBox, Shape, UnionSet};

/// The regions of a simulation, in paint order.
///
/// Later regions overwrite earlier ones where they overlap, so a cell
/// wall added before the cytoplasm it encloses is painted first and
/// then partly covered.
///
/// # Examples
///
/// ```
/// use rdme_builder::Scene;
/// use rdme_core::SiteType;
/// use rdme_geometry::Sphere;
///
/// let mut scene = Scene::new();
/// let cell = Sphere::new([4.0, 4.0, 4.0], 3.0, SiteType(1)).unwrap();
/// scene.add_region("cell", Box::new(cell)).unwrap();
/// assert!(scene.add_region("cell", Box::new(Sphere::new([0.0; 3], 1.0, SiteType(2)).unwrap())).is_err());
/// assert_eq!(scene.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Scene {
    regions: IndexMap<String, Box<dyn Shape>>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region. Names must be unique.
    pub fn add_region(
        &mut self,
        name: impl Into<String>,
        shape: Box<dyn Shape>,
    ) -> Result<(), BuildError> {
        let name = name.into();
        if self.regions.contains_key(&name) {
            return Err(BuildError::DuplicateRegion { name });
        }
        self.regions.insert(name, shape);
        Ok(())
    }

    /// Pack non-overlapping obstacle spheres into region `within` and
    /// append them as one region named `name`.
    ///
    /// Spheres are drawn uniformly from the host's bounding box. Each is
    /// kept only if the host contains it and it touches neither an
    /// earlier obstacle nor any region painted after the host. Packing
    /// stops once the obstacles cover `packing.fraction` of the host's
    /// volume, to the nearest whole sphere. When that rounds to zero
    /// spheres, no region is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use rdme_builder::{Scene, SpherePacking};
    /// use rdme_core::SiteType;
    /// use rdme_geometry::Cuboid;
    ///
    /// let mut scene = Scene::new();
    /// let host = Cuboid::new([0.0; 3], [8.0; 3], SiteType(1)).unwrap();
    /// scene.add_region("cytoplasm", Box::new(host)).unwrap();
    /// let packing = SpherePacking::new(0.1, 0.5, SiteType(2));
    /// let stats = scene.fill_with_random_spheres("crowders", "cytoplasm", &packing).unwrap();
    /// assert_eq!(stats.placed, 98);
    /// assert_eq!(scene.len(), 2);
    /// ```
    pub fn fill_with_random_spheres(
        &mut self,
        name: impl Into<String>,
        within: &str,
        packing: &SpherePacking,
    ) -> Result<PackingStats, BuildError> {
        let name = name.into();
        if self.regions.contains_key(&name) {
            return Err(BuildError::DuplicateRegion { name });
        }
        let (spheres, stats) = pack_spheres(self, within, packing)?;
        if spheres.is_empty() {
            return Ok(stats);
        }
        let members = spheres
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn Shape>)
            .collect();
        let obstacles = UnionSet::new(members, packing.site_type)?;
        self.regions.insert(name, Box::new(obstacles));
        Ok(stats)
    }

    /// Remove a region, keeping the order of the rest.
    pub fn remove_region(&mut self, name: &str) -> Result<Box<dyn Shape>, BuildError> {
        self.regions
            .shift_remove(name)
            .ok_or_else(|| BuildError::UnknownRegion {
                name: name.to_owned(),
            })
    }

    /// Look up a region by name.
    pub fn region(&self, name: &str) -> Option<&dyn Shape> {
        self.regions.get(name).map(|s| s.as_ref())
    }

    /// Regions in paint order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &dyn Shape)> + '_ {
        self.regions.iter().map(|(n, s)| (n.as_str(), s.as_ref()))
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the scene has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Join of every region's bounding box, or `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.regions
            .values()
            .map(|s| *s.bounding_box())
            .reduce(|acc, b| acc.join_with(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::SpherePacking;
    use rdme_core::SiteType;
    use rdme_geometry::{Cuboid, Sphere};

    fn ball(x: f64) -> Box<dyn Shape> {
        Box::new(Sphere::new([x, 0.0, 0.0], 1.0, SiteType(1)).unwrap())
    }

    #[test]
    fn keeps_insertion_order_after_removal() {
        let mut scene = Scene::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            scene.add_region(*name, ball(i as f64)).unwrap();
        }
        scene.remove_region("b").unwrap();
        let names: Vec<_> = scene.regions().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn unknown_and_duplicate_names() {
        let mut scene = Scene::new();
        scene.add_region("a", ball(0.0)).unwrap();
        assert_eq!(
            scene.add_region("a", ball(1.0)),
            Err(BuildError::DuplicateRegion { name: "a".into() })
        );
        assert!(matches!(
            scene.remove_region("z"),
            Err(BuildError::UnknownRegion { .. })
        ));
        assert!(scene.region("z").is_none());
    }

    #[test]
    fn packed_obstacles_become_one_region() {
        let mut scene = Scene::new();
        let host = Cuboid::new([0.0; 3], [6.0; 3], SiteType(1)).unwrap();
        scene.add_region("cytoplasm", Box::new(host)).unwrap();
        let packing = SpherePacking::new(0.15, 0.5, SiteType(7));
        let stats = scene
            .fill_with_random_spheres("crowders", "cytoplasm", &packing)
            .unwrap();
        // 0.15 * 216 / 0.5236 = 61.9
        assert_eq!(stats.placed, 62);
        {
            let crowders = scene.region("crowders").unwrap();
            assert_eq!(crowders.site_type(), SiteType(7));
            let set = crowders.downcast_ref::<UnionSet>().unwrap();
            assert_eq!(set.members().len(), 62);
            assert!(scene.region("cytoplasm").unwrap().contains_shape(crowders));
        }

        assert_eq!(
            scene.fill_with_random_spheres("crowders", "cytoplasm", &packing),
            Err(BuildError::DuplicateRegion {
                name: "crowders".into()
            })
        );
        // A second pass avoids the first pass's obstacles.
        let small_packing = SpherePacking::new(0.02, 0.3, SiteType(8));
        let second = scene
            .fill_with_random_spheres("small", "cytoplasm", &small_packing)
            .unwrap();
        let crowders = scene.region("crowders").unwrap();
        let small = scene.region("small").unwrap();
        let small = small.downcast_ref::<UnionSet>().unwrap();
        assert_eq!(small.members().len(), second.placed);
        assert!(small.members().all(|s| !crowders.intersects(s)));
    }

    #[test]
    fn zero_sphere_packing_adds_nothing() {
        let mut scene = Scene::new();
        scene.add_region("cell", ball(0.0)).unwrap();
        let packing = SpherePacking::new(0.001, 0.5, SiteType(2));
        let stats = scene.fill_with_random_spheres("none", "cell", &packing).unwrap();
        assert_eq!(stats.placed, 0);
        assert!(scene.region("none").is_none());
    }

    #[test]
    fn bounding_box_joins_regions() {
        let mut scene = Scene::new();
        assert!(scene.bounding_box().is_none());
        scene.add_region("ball", ball(0.0)).unwrap();
        let slab = Cuboid::new([2.0, -3.0, 0.0], [5.0, 0.0, 0.5], SiteType(2)).unwrap();
        scene.add_region("slab", Box::new(slab)).unwrap();
        let b = scene.bounding_box().unwrap();
        assert_eq!(b.min(), [-1.0, -3.0, -1.0]);
        assert_eq!(b.max(), [5.0, 1.0, 1.0]);
        assert_eq!(scene.region("slab").unwrap().site_type(), SiteType(2));
    }
}
