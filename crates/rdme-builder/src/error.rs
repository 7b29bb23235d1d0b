//! Errors from scene assembly and rasterization.

use rdme_core::{GeometryError, LatticeError, SiteType};
use std::error::Error;
use std::fmt;

/// Errors from building a scene or painting it into a lattice.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// A region with this name is already in the scene.
    DuplicateRegion {
        /// The clashing name.
        name: String,
    },
    /// No region has this name.
    UnknownRegion {
        /// The requested name.
        name: String,
    },
    /// Raster spacing or origin is unusable.
    InvalidSpacing {
        /// What went wrong.
        reason: String,
    },
    /// Obstacle packing parameters are unusable.
    InvalidPacking {
        /// What went wrong.
        reason: String,
    },
    /// Obstacle packing ran out of attempts before reaching its target.
    PackingStalled {
        /// Spheres placed before giving up.
        placed: usize,
        /// Spheres needed for the target fraction.
        wanted: usize,
        /// Candidate positions tried.
        attempts: u64,
    },
    /// Particle word 0 marks an empty site and cannot be placed.
    InvalidParticle,
    /// Fewer free sites of a type than particles requested.
    InsufficientSites {
        /// Site type the particles were meant for.
        site_type: SiteType,
        /// Particles requested.
        requested: usize,
        /// Free sites of that type.
        available: usize,
    },
    /// A generated shape was rejected.
    Geometry(GeometryError),
    /// The target lattice rejected the request.
    Lattice(LatticeError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRegion { name } => write!(f, "region '{name}' already defined"),
            Self::UnknownRegion { name } => write!(f, "no region named '{name}'"),
            Self::InvalidSpacing { reason } => write!(f, "invalid raster grid: {reason}"),
            Self::InvalidPacking { reason } => write!(f, "invalid sphere packing: {reason}"),
            Self::PackingStalled {
                placed,
                wanted,
                attempts,
            } => write!(
                f,
                "placed only {placed} of {wanted} spheres after {attempts} attempts"
            ),
            Self::InvalidParticle => write!(f, "particle word 0 is reserved for empty sites"),
            Self::InsufficientSites {
                site_type,
                requested,
                available,
            } => write!(
                f,
                "{requested} particles requested but only {available} free sites of type {site_type}"
            ),
            Self::Geometry(e) => write!(f, "geometry error: {e}"),
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for BuildError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<GeometryError> for BuildError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}
