//! Random packing of non-overlapping obstacle spheres into a region.

use crate::error::BuildError;
use crate::scene::Scene;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rdme_core::SiteType;
use rdme_geometry::{Shape, Sphere};
use std::f64::consts::PI;

/// Parameters for [`Scene::fill_with_random_spheres`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpherePacking {
    /// Share of the host region's volume to cover, in `[0, 1)`.
    pub fraction: f64,
    /// Radius of every obstacle sphere.
    pub radius: f64,
    /// Site type the obstacles paint.
    pub site_type: SiteType,
    /// Seed for candidate positions. Default: 0.
    pub seed: u64,
    /// Candidate positions tried before giving up.
    /// Default: [`SpherePacking::DEFAULT_MAX_ATTEMPTS`].
    pub max_attempts: u64,
}

impl SpherePacking {
    /// Default attempt budget.
    pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

    /// Pack spheres of `radius` painting `site_type` until they cover
    /// `fraction` of the host region.
    pub fn new(fraction: f64, radius: f64, site_type: SiteType) -> Self {
        Self {
            fraction,
            radius,
            site_type,
            seed: 0,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Check the parameters before any candidate is drawn.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !(0.0..1.0).contains(&self.fraction) {
            return Err(BuildError::InvalidPacking {
                reason: format!("fraction must be in [0, 1), got {}", self.fraction),
            });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(BuildError::InvalidPacking {
                reason: format!("radius must be finite and > 0, got {}", self.radius),
            });
        }
        if self.max_attempts == 0 {
            return Err(BuildError::InvalidPacking {
                reason: "max_attempts must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Volume of one obstacle.
    pub fn sphere_volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }
}

/// Outcome of a packing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackingStats {
    /// Spheres placed.
    pub placed: usize,
    /// Candidate positions drawn.
    pub attempts: u64,
    /// Volume of the host region.
    pub region_volume: f64,
    /// Total volume of the placed spheres.
    pub placed_volume: f64,
}

impl PackingStats {
    /// Share of the host region the spheres cover.
    pub fn fraction(&self) -> f64 {
        if self.region_volume == 0.0 {
            return 0.0;
        }
        self.placed_volume / self.region_volume
    }
}

/// Draw obstacle spheres inside region `within` of `scene`.
///
/// A candidate is kept when the host contains it, it misses every sphere
/// kept so far, and it misses every region painted after the host. The
/// number of spheres is the target volume divided by one sphere's
/// volume, rounded to the nearest whole sphere.
pub(crate) fn pack_spheres(
    scene: &Scene,
    within: &str,
    packing: &SpherePacking,
) -> Result<(Vec<Sphere>, PackingStats), BuildError> {
    packing.validate()?;
    let host = scene.region(within).ok_or_else(|| BuildError::UnknownRegion {
        name: within.to_owned(),
    })?;
    let later: Vec<&dyn Shape> = scene
        .regions()
        .skip_while(|(name, _)| *name != within)
        .skip(1)
        .map(|(_, shape)| shape)
        .collect();

    let region_volume = host.volume(false);
    let one = packing.sphere_volume();
    let wanted = (packing.fraction * region_volume / one).round() as usize;
    let bbox = *host.bounding_box();

    let mut rng = ChaCha8Rng::seed_from_u64(packing.seed);
    let mut placed: Vec<Sphere> = Vec::with_capacity(wanted);
    let mut attempts = 0u64;
    while placed.len() < wanted {
        if attempts == packing.max_attempts {
            return Err(BuildError::PackingStalled {
                placed: placed.len(),
                wanted,
                attempts,
            });
        }
        attempts += 1;
        let u = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
        let candidate = Sphere::new(bbox.lerp(u), packing.radius, packing.site_type)?;
        if !host.contains_shape(&candidate)
            || placed.iter().any(|s| s.intersects(&candidate))
            || later.iter().any(|s| s.intersects(&candidate))
        {
            continue;
        }
        placed.push(candidate);
    }

    let stats = PackingStats {
        placed: placed.len(),
        attempts,
        region_volume,
        placed_volume: placed.len() as f64 * one,
    };
    log::debug!(
        "packed {} spheres of radius {} into '{within}' ({:.4} of {:.4}) in {attempts} attempts",
        stats.placed,
        packing.radius,
        stats.placed_volume,
        region_volume
    );
    Ok((placed, stats))
}
