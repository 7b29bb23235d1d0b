//! rdme: the spatial substrate of a lattice reaction-diffusion simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all rdme sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use rdme::prelude::*;
//!
//! // A spherical cell with a cubic nucleoid carved out of its middle.
//! let cell = Sphere::new([8.0, 8.0, 8.0], 6.0, SiteType(1)).unwrap();
//! let nucleoid = Cuboid::new([6.0; 3], [10.0; 3], SiteType(2)).unwrap();
//! let mut scene = Scene::new();
//! scene.add_region("cell", Box::new(cell)).unwrap();
//! scene.add_region("nucleoid", Box::new(nucleoid)).unwrap();
//!
//! // Paint it into a 16^3 lattice with a site-type and an occupancy plane.
//! let mut lattice = Lattice::new(LatticeDims::new(16, 16, 16).unwrap(), 2).unwrap();
//! let stats = rasterize(&scene, &mut lattice, &RasterConfig::default()).unwrap();
//! assert_eq!(stats.count(SiteType(2)), 4 * 4 * 4);
//!
//! // Cut it into y tiles with one periodic ghost row on each side.
//! let tiles = extract_tiles(&lattice, &TilingConfig::new(Axis::Y, 4, 1)).unwrap();
//! assert_eq!(tiles.len(), 4);
//! assert_eq!(tiles[0].source_row(0), Some(15));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rdme-core` | Site types, axes, points, error enums |
//! | [`geometry`] | `rdme-geometry` | Shapes, Boolean combinators, volume integration |
//! | [`lattice`] | `rdme-lattice` | Lattice storage, periodic windows and tiling |
//! | [`builder`] | `rdme-builder` | Scenes, obstacle packing, rasterization, particle seeding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`rdme-core`).
pub use rdme_core as types;

/// Constructive solid geometry (`rdme-geometry`).
///
/// The [`geometry::Shape`] trait, primitives, the [`geometry::Union`]
/// family of combinators, and Monte-Carlo [`geometry::integrate`].
pub use rdme_geometry as geometry;

/// Lattice storage and periodic tiling (`rdme-lattice`).
///
/// [`lattice::Lattice`], [`lattice::WindowSpec`] and
/// [`lattice::extract_window`].
pub use rdme_lattice as lattice;

/// Scene assembly and rasterization (`rdme-builder`).
pub use rdme_builder as builder;

/// Common imports for typical rdme usage.
///
/// ```rust
/// use rdme::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rdme_core::{Axis, Point, SiteType};

    // Errors
    pub use rdme_builder::BuildError;
    pub use rdme_core::{GeometryError, LatticeError, WindowError};

    // Geometry
    pub use rdme_geometry::{
        BoundingBox, Capsule, Convergence, Cuboid, Cylinder, Difference, IntegratorConfig,
        Intersection, Shape, Sphere, Union, UnionSet, VolumeEstimate,
    };

    // Lattice
    pub use rdme_lattice::{
        extract_tiles, extract_window, Lattice, LatticeDims, TileBuffer, TilingConfig, WindowSpec,
    };

    // Builder
    pub use rdme_builder::{
        place_particles, rasterize, PackingStats, RasterConfig, RasterStats, Scene, SpherePacking,
    };
}
