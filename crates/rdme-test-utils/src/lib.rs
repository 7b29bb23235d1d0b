//! Test utilities and fixtures for rdme development.
//!
//! Provides coordinate-encoded lattices for checking window arithmetic
//! site by site, stock shapes with known volumes, a fast integrator
//! configuration, and [`init_logging`] for tests that want log output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    coordinate_lattice, encode_xyz, encode_zxy, fast_integrator, filled_lattice, sphere, unit_cube,
};

/// Route `log` output through `env_logger` for the current test binary.
///
/// Safe to call from every test; only the first call installs the logger.
/// Filter with `RUST_LOG` as usual.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    log::trace!("test logging initialised");
}
