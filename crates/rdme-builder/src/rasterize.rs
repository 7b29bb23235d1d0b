//! Painting scene regions into a lattice's site-type plane.

use crate::error::BuildError;
use crate::scene::Scene;
use rdme_core::{Axis, Point, SiteType};
use rdme_geometry::{BoundingBox, Shape};
use rdme_lattice::{Lattice, LatticeDims};
use std::collections::BTreeMap;
use std::ops::Range;

/// Mapping from lattice cells to continuous space.
///
/// Cell `(i, j, k)` has its centre at `origin + (index + 0.5) * spacing`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterConfig {
    /// Position of the lattice's lower corner. Default: the origin.
    pub origin: Point,
    /// Edge length of one cell. Default: 1.0.
    pub spacing: f64,
    /// Word plane receiving site types. Default: [`Lattice::SITE_TYPE_PLANE`].
    pub plane: usize,
    /// Site type of cells no region contains. Default: `SiteType(0)`.
    pub background: SiteType,
}

impl RasterConfig {
    /// Cells of edge `spacing` starting at `origin`, other fields default.
    pub fn new(origin: Point, spacing: f64) -> Self {
        Self {
            origin,
            spacing,
            ..Self::default()
        }
    }

    /// Check that the grid maps to finite coordinates.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(BuildError::InvalidSpacing {
                reason: format!("spacing must be finite and > 0, got {}", self.spacing),
            });
        }
        if let Some(c) = self.origin.iter().find(|c| !c.is_finite()) {
            return Err(BuildError::InvalidSpacing {
                reason: format!("origin must be finite, got {c}"),
            });
        }
        Ok(())
    }

    /// Centre of cell `coord`.
    pub fn cell_center(&self, coord: [usize; 3]) -> Point {
        [0, 1, 2].map(|i| self.origin[i] + (coord[i] as f64 + 0.5) * self.spacing)
    }

    /// Cells along `axis` whose centres may fall inside `bbox`.
    ///
    /// Widened by one cell on each side to absorb rounding; callers still
    /// check the centre against the box.
    fn cell_range(&self, bbox: &BoundingBox, axis: Axis, dims: &LatticeDims) -> Range<usize> {
        let i = axis.index();
        let n = dims.len(axis);
        let to_cell = |c: f64| (c - self.origin[i]) / self.spacing - 0.5;
        let lo = to_cell(bbox.min()[i]).ceil() - 1.0;
        let hi = to_cell(bbox.max()[i]).floor() + 2.0;
        let clamp = |v: f64| v.clamp(0.0, n as f64) as usize;
        clamp(lo)..clamp(hi)
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            spacing: 1.0,
            plane: Lattice::SITE_TYPE_PLANE,
            background: SiteType(0),
        }
    }
}

/// Outcome of a rasterization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Final number of cells per site word.
    counts: BTreeMap<u32, usize>,
    /// Cell centres tested against a region.
    pub tested: usize,
    /// Cells painted, overwrites included.
    pub painted: usize,
}

impl RasterStats {
    /// Cells holding `site_type` after the pass.
    pub fn count(&self, site_type: SiteType) -> usize {
        self.counts.get(&site_type.word()).copied().unwrap_or(0)
    }

    /// `(site word, cells)` pairs in ascending word order.
    pub fn counts(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.counts.iter().map(|(&w, &n)| (w, n))
    }
}

/// Paint `scene` into the site-type plane of `lattice`.
///
/// The plane is first filled with the background type; then each region
/// in scene order paints its site type into every cell whose centre it
/// contains. Only cells whose centres lie in a region's bounding box are
/// tested against it.
pub fn rasterize(
    scene: &Scene,
    lattice: &mut Lattice,
    config: &RasterConfig,
) -> Result<RasterStats, BuildError> {
    config.validate()?;
    let dims = lattice.dims();
    let plane = lattice.plane_mut(config.plane)?;
    plane.fill(config.background.word());

    let mut stats = RasterStats::default();
    for (name, shape) in scene.regions() {
        let (tested, painted) = paint_region(shape, plane, &dims, config);
        log::trace!("region '{name}' ({}): {painted} of {tested} tested cells", shape.kind());
        stats.tested += tested;
        stats.painted += painted;
    }
    for &w in plane.iter() {
        *stats.counts.entry(w).or_insert(0) += 1;
    }
    log::debug!(
        "rasterized {} regions into {dims}: {} cells tested, {} painted",
        scene.len(),
        stats.tested,
        stats.painted
    );
    Ok(stats)
}

fn paint_region(
    shape: &dyn Shape,
    plane: &mut [u32],
    dims: &LatticeDims,
    config: &RasterConfig,
) -> (usize, usize) {
    let bbox = shape.bounding_box();
    let word = shape.site_type().word();
    let [xs, ys, zs] = Axis::ALL.map(|a| config.cell_range(bbox, a, dims));
    let (mut tested, mut painted) = (0, 0);
    for z in zs {
        for y in ys.clone() {
            for x in xs.clone() {
                let centre = config.cell_center([x, y, z]);
                if !bbox.contains_point(&centre) {
                    continue;
                }
                tested += 1;
                if shape.contains_point(&centre) {
                    plane[dims.index(x, y, z)] = word;
                    painted += 1;
                }
            }
        }
    }
    (tested, painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdme_geometry::{Cuboid, Sphere};

    fn lattice(n: usize) -> Lattice {
        Lattice::new(LatticeDims::new(n, n, n).unwrap(), 2).unwrap()
    }

    #[test]
    fn rejects_bad_grid() {
        let mut l = lattice(2);
        let scene = Scene::new();
        let bad = RasterConfig::new([0.0; 3], 0.0);
        assert!(matches!(
            rasterize(&scene, &mut l, &bad),
            Err(BuildError::InvalidSpacing { .. })
        ));
        let nan = RasterConfig::new([f64::NAN, 0.0, 0.0], 1.0);
        assert!(nan.validate().is_err());
        let wrong_plane = RasterConfig {
            plane: 2,
            ..RasterConfig::default()
        };
        assert!(matches!(
            rasterize(&scene, &mut l, &wrong_plane),
            Err(BuildError::Lattice(_))
        ));
    }

    #[test]
    fn empty_scene_is_all_background() {
        let mut l = lattice(3);
        let cfg = RasterConfig {
            background: SiteType(9),
            ..RasterConfig::default()
        };
        let stats = rasterize(&Scene::new(), &mut l, &cfg).unwrap();
        assert_eq!(stats.count(SiteType(9)), 27);
        assert_eq!(stats.tested, 0);
        assert!(l.plane(1).unwrap().iter().all(|&w| w == 0));
    }

    #[test]
    fn cuboid_paints_exact_cells() {
        let mut l = lattice(6);
        let mut scene = Scene::new();
        let slab = Cuboid::new([1.0, 0.0, 2.0], [3.0, 6.0, 3.0], SiteType(4)).unwrap();
        scene.add_region("slab", Box::new(slab)).unwrap();
        let stats = rasterize(&scene, &mut l, &RasterConfig::default()).unwrap();
        // Centres 1.5 and 2.5 along x, every y, 2.5 along z.
        assert_eq!(stats.count(SiteType(4)), 2 * 6);
        assert_eq!(stats.painted, 12);
        assert_eq!(stats.tested, 12);
        assert_eq!(l.get([1, 5, 2], 0).unwrap(), 4);
        assert_eq!(l.get([0, 5, 2], 0).unwrap(), 0);
    }

    #[test]
    fn later_regions_overwrite_and_pruning_limits_tests() {
        let mut l = lattice(10);
        let mut scene = Scene::new();
        let big = Cuboid::new([0.0; 3], [10.0; 3], SiteType(1)).unwrap();
        let core = Sphere::new([5.0; 3], 2.0, SiteType(2)).unwrap();
        scene.add_region("cytoplasm", Box::new(big)).unwrap();
        scene.add_region("nucleoid", Box::new(core)).unwrap();
        let stats = rasterize(&scene, &mut l, &RasterConfig::default()).unwrap();
        assert_eq!(stats.count(SiteType(1)) + stats.count(SiteType(2)), 1000);
        assert_eq!(l.get([5, 5, 5], 0).unwrap(), 2);
        assert_eq!(l.get([0, 0, 0], 0).unwrap(), 1);
        // The sphere only tests the 4x4x4 centres inside its box.
        assert_eq!(stats.tested, 1000 + 64);
        let counted: usize = stats.counts().map(|(_, n)| n).sum();
        assert_eq!(counted, 1000);
    }

    #[test]
    fn origin_and_spacing_shift_centres() {
        let mut l = lattice(4);
        let mut scene = Scene::new();
        let s = Sphere::new([0.0; 3], 0.5, SiteType(3)).unwrap();
        scene.add_region("dot", Box::new(s)).unwrap();
        let cfg = RasterConfig::new([-1.0, -1.0, -1.0], 0.5);
        assert_eq!(cfg.cell_center([2, 2, 2]), [0.25, 0.25, 0.25]);
        let stats = rasterize(&scene, &mut l, &cfg).unwrap();
        // Only centres at +-0.25 fall in the box; all lie within 0.5 of the origin.
        assert_eq!(stats.count(SiteType(3)), 8);
    }
}
