//! Reusable lattice and shape fixtures.
//!
//! - [`coordinate_lattice`]: two word planes whose values encode each
//!   site's own coordinate, so any misplaced copy is visible.
//! - [`filled_lattice`]: every site of every plane set to one value.
//! - [`unit_cube`] / [`sphere`]: shapes with analytic volumes.

use rdme_core::SiteType;
use rdme_geometry::{Cuboid, IntegratorConfig, Shape, Sphere};
use rdme_lattice::{Lattice, LatticeDims};

/// Bits per coordinate field in the encoded site words.
pub const FIELD_BITS: u32 = 10;

/// Plane-0 word for site `(x, y, z)`: `x | y << 10 | z << 20`.
pub fn encode_xyz(x: usize, y: usize, z: usize) -> u32 {
    debug_assert!(x < 1 << FIELD_BITS && y < 1 << FIELD_BITS && z < 1 << FIELD_BITS);
    (x | y << FIELD_BITS | z << (2 * FIELD_BITS)) as u32
}

/// Plane-1 word for site `(x, y, z)`: `z | x << 10 | y << 20`.
pub fn encode_zxy(x: usize, y: usize, z: usize) -> u32 {
    encode_xyz(z, x, y)
}

/// A two-plane lattice with [`encode_xyz`] in plane 0 and [`encode_zxy`] in plane 1.
///
/// Panics on invalid dimensions.
pub fn coordinate_lattice(x: usize, y: usize, z: usize) -> Lattice {
    let dims = LatticeDims::new(x, y, z).expect("fixture dims");
    let mut lattice = Lattice::new(dims, 2).expect("fixture lattice");
    lattice.fill_with(|[x, y, z], plane| match plane {
        0 => encode_xyz(x, y, z),
        _ => encode_zxy(x, y, z),
    });
    lattice
}

/// A lattice with `words.len()` planes, plane `p` filled with `words[p]`.
pub fn filled_lattice(x: usize, y: usize, z: usize, words: &[u32]) -> Lattice {
    let dims = LatticeDims::new(x, y, z).expect("fixture dims");
    let mut lattice = Lattice::new(dims, words.len()).expect("fixture lattice");
    lattice.fill_with(|_, plane| words[plane]);
    lattice
}

/// Unit cube with its lower corner at `min`.
pub fn unit_cube(min: [f64; 3], site_type: u8) -> Box<dyn Shape> {
    let max = [min[0] + 1.0, min[1] + 1.0, min[2] + 1.0];
    Box::new(Cuboid::new(min, max, SiteType(site_type)).expect("fixture cube"))
}

/// Sphere of `radius` around `center`.
pub fn sphere(center: [f64; 3], radius: f64, site_type: u8) -> Box<dyn Shape> {
    Box::new(Sphere::new(center, radius, SiteType(site_type)).expect("fixture sphere"))
}

/// Integrator settings loose enough for tests: converges in well under
/// a second yet stays within about one percent on simple shapes.
pub fn fast_integrator(seed: u64) -> IntegratorConfig {
    IntegratorConfig {
        threshold: 1e-4,
        batch_size: 4096,
        min_samples: 1 << 17,
        max_samples: 1 << 22,
        seed,
        workers: Some(2),
    }
}
