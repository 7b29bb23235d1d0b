//! Lattice storage and periodic tiling for rdme.
//!
//! The master [`Lattice`] holds one or more `u32` word planes per site.
//! Kernels work on tiles: windows cut along one axis and framed with
//! apron (ghost) rows taken from the periodically wrapped neighbours.
//!
//! # Window extraction
//!
//! - [`WindowSpec`] describes a request and validates it up front.
//! - [`copy_window`] is the pure copy over explicit dimensions.
//! - [`extract_window`] / [`extract_window_into`] produce a [`TileBuffer`],
//!   which can write its interior back with [`TileBuffer::write_interior`].
//! - [`tile_axis`] and [`extract_tiles`] cut a whole axis, the latter in
//!   parallel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dims;
pub mod lattice;
pub mod tiling;
pub mod window;
pub mod wrap;

pub use config::TilingConfig;
pub use dims::LatticeDims;
pub use lattice::Lattice;
pub use tiling::{extract_tiles, project_aprons, tile_axis};
pub use window::{copy_window, extract_window, extract_window_into, TileBuffer, WindowSpec};
pub use wrap::{wrap, wrap_offset};
