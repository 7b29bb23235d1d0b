//! Seeding particles into the occupancy plane of a painted lattice.

use crate::error::BuildError;
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rdme_core::SiteType;
use rdme_lattice::Lattice;

/// Place `count` particles of word `particle` on free sites of `site_type`.
///
/// A site is free when its occupancy word is 0; each site holds at most
/// one particle. Sites are drawn uniformly without replacement from a
/// [`ChaCha8Rng`] seeded with `seed`, so the same lattice and seed give
/// the same placement. Returns the linear site indices written, in
/// draw order.
///
/// The lattice must carry an occupancy plane
/// ([`Lattice::OCCUPANCY_PLANE`]). Nothing is written unless every
/// particle fits.
pub fn place_particles(
    lattice: &mut Lattice,
    particle: u32,
    site_type: SiteType,
    count: usize,
    seed: u64,
) -> Result<Vec<usize>, BuildError> {
    if particle == 0 {
        return Err(BuildError::InvalidParticle);
    }
    let free: Vec<usize> = {
        let types = lattice.plane(Lattice::SITE_TYPE_PLANE)?;
        let occupancy = lattice.plane(Lattice::OCCUPANCY_PLANE)?;
        types
            .iter()
            .zip(occupancy)
            .enumerate()
            .filter(|(_, (t, o))| **t == site_type.word() && **o == 0)
            .map(|(i, _)| i)
            .collect()
    };
    if free.len() < count {
        return Err(BuildError::InsufficientSites {
            site_type,
            requested: count,
            available: free.len(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let chosen: Vec<usize> = index::sample(&mut rng, free.len(), count)
        .into_iter()
        .map(|k| free[k])
        .collect();
    let occupancy = lattice.plane_mut(Lattice::OCCUPANCY_PLANE)?;
    for &i in &chosen {
        occupancy[i] = particle;
    }
    log::debug!(
        "placed {count} particles of type {particle} on {} free sites of type {site_type}",
        free.len()
    );
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdme_core::LatticeError;
    use rdme_lattice::LatticeDims;

    /// 4x4x4 lattice whose lower half (z < 2) is site type 1.
    fn half_painted() -> Lattice {
        let mut l = Lattice::new(LatticeDims::new(4, 4, 4).unwrap(), 2).unwrap();
        l.fill_with(|[_, _, z], plane| u32::from(plane == 0 && z < 2));
        l
    }

    #[test]
    fn particles_land_on_free_sites_of_the_type() {
        let mut l = half_painted();
        let sites = place_particles(&mut l, 4, SiteType(1), 9, 11).unwrap();
        assert_eq!(sites.len(), 9);
        let types = l.plane(Lattice::SITE_TYPE_PLANE).unwrap();
        let occupancy = l.plane(Lattice::OCCUPANCY_PLANE).unwrap();
        assert!(sites.iter().all(|&i| types[i] == 1 && occupancy[i] == 4));
        assert_eq!(occupancy.iter().filter(|&&w| w == 4).count(), 9);
        assert!(l.plane(Lattice::SITE_TYPE_PLANE).unwrap().iter().all(|&w| w <= 1));
    }

    #[test]
    fn occupied_sites_are_skipped() {
        let mut l = half_painted();
        place_particles(&mut l, 8, SiteType(1), 30, 1).unwrap();
        let more = place_particles(&mut l, 10, SiteType(1), 2, 2).unwrap();
        let occupancy = l.plane(Lattice::OCCUPANCY_PLANE).unwrap();
        assert!(more.iter().all(|&i| occupancy[i] == 10));
        assert_eq!(occupancy.iter().filter(|&&w| w == 8).count(), 30);
        assert_eq!(
            place_particles(&mut l, 10, SiteType(1), 1, 3),
            Err(BuildError::InsufficientSites {
                site_type: SiteType(1),
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn failed_request_writes_nothing() {
        let mut l = half_painted();
        let before = l.clone();
        assert!(matches!(
            place_particles(&mut l, 3, SiteType(1), 33, 0),
            Err(BuildError::InsufficientSites { available: 32, .. })
        ));
        assert_eq!(
            place_particles(&mut l, 0, SiteType(1), 1, 0),
            Err(BuildError::InvalidParticle)
        );
        assert_eq!(l, before);
    }

    #[test]
    fn same_seed_same_sites() {
        let mut a = half_painted();
        let mut b = half_painted();
        assert_eq!(
            place_particles(&mut a, 2, SiteType(0), 5, 42).unwrap(),
            place_particles(&mut b, 2, SiteType(0), 5, 42).unwrap()
        );
        assert_eq!(a, b);
    }

    #[test]
    fn needs_an_occupancy_plane() {
        let mut l = Lattice::new(LatticeDims::new(2, 2, 2).unwrap(), 1).unwrap();
        assert!(matches!(
            place_particles(&mut l, 1, SiteType(0), 1, 0),
            Err(BuildError::Lattice(LatticeError::PlaneOutOfRange { .. }))
        ));
    }
}
