//! Scene assembly and rasterization for rdme lattices.
//!
//! A [`Scene`] is an ordered set of named regions, each a
//! [`Shape`](rdme_geometry::Shape) tree carrying the site type it paints.
//! [`rasterize`] turns a scene into site types in a
//! [`Lattice`](rdme_lattice::Lattice), pruning every region to the
//! cells inside its bounding box.
//!
//! Scenes can also be crowded with random obstacle spheres
//! ([`Scene::fill_with_random_spheres`]), and a painted lattice seeded
//! with particles ([`place_particles`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod packing;
pub mod particles;
pub mod rasterize;
pub mod scene;

pub use error::BuildError;
pub use packing::{PackingStats, SpherePacking};
pub use particles::place_particles;
pub use rasterize::{rasterize, RasterConfig, RasterStats};
pub use scene::Scene;
