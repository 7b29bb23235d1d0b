//! Core types for the rdme lattice substrate.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the geometry, lattice and builder crates:
//! site types, continuous points, lattice axes, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{GeometryError, LatticeError, WindowError};
pub use id::{Axis, Point, SiteType};
