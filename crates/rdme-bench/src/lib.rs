//! Benchmark profiles for the rdme lattice substrate.
//!
//! - [`reference_lattice`]: 384x96x64, two planes, the size the apron
//!   reference scenario uses
//! - [`bacterium_scene`]: a rod-shaped cell with membrane, cytoplasm and
//!   nucleoid, sized for [`reference_lattice`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rdme_builder::Scene;
use rdme_core::SiteType;
use rdme_geometry::{Capsule, Difference, IntegratorConfig, Shape, Sphere, UnionSet};
use rdme_lattice::{Lattice, LatticeDims};

/// Site type of the membrane shell.
pub const MEMBRANE: SiteType = SiteType(1);
/// Site type of the cytoplasm.
pub const CYTOPLASM: SiteType = SiteType(2);
/// Site type of the nucleoid lobes.
pub const NUCLEOID: SiteType = SiteType(3);

/// A 384x96x64 lattice with two word planes, every site distinct.
pub fn reference_lattice() -> Lattice {
    let dims = LatticeDims::new(384, 96, 64).unwrap();
    let mut lattice = Lattice::new(dims, 2).unwrap();
    lattice.fill_with(|[x, y, z], plane| (x | y << 10 | z << 20) as u32 ^ (plane as u32) << 31);
    lattice
}

/// A rod cell lying along x, centred in [`reference_lattice`].
///
/// Composite volumes use `integrator`.
pub fn bacterium_scene(integrator: &IntegratorConfig) -> Scene {
    let rod = |r: f64, t: SiteType| {
        Capsule::new([72.0, 48.0, 32.0], [312.0, 48.0, 32.0], r, t).unwrap()
    };
    let membrane = Difference::new(
        Box::new(rod(28.0, MEMBRANE)),
        Box::new(rod(26.0, MEMBRANE)),
        MEMBRANE,
    )
    .with_integrator(integrator.clone())
    .unwrap();
    let lobes: Vec<Box<dyn Shape>> = [144.0, 240.0]
        .iter()
        .map(|&x| {
            Box::new(Sphere::new([x, 48.0, 32.0], 16.0, NUCLEOID).unwrap()) as Box<dyn Shape>
        })
        .collect();
    let nucleoid = UnionSet::new(lobes, NUCLEOID)
        .unwrap()
        .with_integrator(integrator.clone())
        .unwrap();

    let mut scene = Scene::new();
    scene.add_region("membrane", Box::new(membrane)).unwrap();
    scene.add_region("cytoplasm", Box::new(rod(26.0, CYTOPLASM))).unwrap();
    scene.add_region("nucleoid", Box::new(nucleoid)).unwrap();
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bacterium_fits_reference_lattice() {
        let dims = reference_lattice().dims();
        let scene = bacterium_scene(&IntegratorConfig::default());
        let bbox = scene.bounding_box().unwrap();
        let extent = dims.as_array();
        for i in 0..3 {
            assert!(bbox.min()[i] >= 0.0);
            assert!(bbox.max()[i] <= extent[i] as f64);
        }
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn reference_words_are_distinct_per_plane() {
        let lattice = reference_lattice();
        assert_ne!(lattice.get([1, 2, 3], 0).unwrap(), lattice.get([1, 2, 3], 1).unwrap());
        assert_eq!(lattice.get([1, 2, 3], 0).unwrap(), 1 | 2 << 10 | 3 << 20);
    }
}
