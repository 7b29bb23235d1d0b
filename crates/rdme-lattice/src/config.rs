//! Tiling configuration.

use crate::dims::LatticeDims;
use crate::window::WindowSpec;
use rdme_core::{Axis, WindowError};

/// How a lattice is cut into tiles for kernel consumption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilingConfig {
    /// Axis the tiles are cut along. Default: [`Axis::Y`].
    pub axis: Axis,
    /// Interior rows per tile; the last tile may be shorter.
    /// Default: 32.
    pub tile_extent: usize,
    /// Ghost rows on each side of every tile. Default: 1.
    pub apron: usize,
    /// Extraction threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 16]`).
    pub workers: Option<usize>,
}

impl TilingConfig {
    /// Default interior rows per tile.
    pub const DEFAULT_TILE_EXTENT: usize = 32;

    /// Default apron width.
    pub const DEFAULT_APRON: usize = 1;

    /// Tiles of `tile_extent` rows along `axis` with `apron` ghost rows.
    pub fn new(axis: Axis, tile_extent: usize, apron: usize) -> Self {
        Self {
            axis,
            tile_extent,
            apron,
            workers: None,
        }
    }

    /// Check the configuration against a master lattice.
    ///
    /// A tile extent longer than the axis is rejected like an oversized
    /// window; the apron follows the window rules.
    pub fn validate(&self, dims: &LatticeDims) -> Result<(), WindowError> {
        WindowSpec::new(self.axis, 0, self.tile_extent, self.apron).validate(dims)
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, 16),
        }
    }
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self::new(Axis::Y, Self::DEFAULT_TILE_EXTENT, Self::DEFAULT_APRON)
    }
}
