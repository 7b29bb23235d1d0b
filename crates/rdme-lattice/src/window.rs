//! Periodic window extraction.
//!
//! A window is a contiguous run of rows along one axis of the master
//! lattice. Extraction copies those rows into a tile buffer framed by
//! `apron` ghost rows on each side. Ghost rows are taken from the
//! periodic neighbours of the window, wrapped over the full master axis
//! and never over the tile itself, so a window spanning the whole axis
//! still receives the opposite face as its apron.
//!
//! Tile row `t` is fed by master row `(start - apron + t) mod len`;
//! the other two axes are copied unchanged and every word plane uses
//! the same indexing.

use crate::dims::LatticeDims;
use crate::lattice::Lattice;
use crate::wrap::wrap_offset;
use rdme_core::{Axis, LatticeError, WindowError};
use smallvec::SmallVec;
use std::ops::Range;

/// Source row per tile row. Inline for typical tiles.
pub(crate) type RowMap = SmallVec<[usize; 16]>;

/// A window request: `extent` rows from `start` along `axis`, plus
/// `apron` ghost rows on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowSpec {
    /// Axis the window is cut along.
    pub axis: Axis,
    /// First interior row, in master coordinates.
    pub start: usize,
    /// Interior rows.
    pub extent: usize,
    /// Ghost rows on each side.
    pub apron: usize,
}

impl WindowSpec {
    /// Create a window request.
    pub fn new(axis: Axis, start: usize, extent: usize, apron: usize) -> Self {
        Self {
            axis,
            start,
            extent,
            apron,
        }
    }

    /// A window covering the whole of `axis`.
    pub fn full(dims: &LatticeDims, axis: Axis, apron: usize) -> Self {
        Self::new(axis, 0, dims.len(axis), apron)
    }

    /// Check the request against the master lattice.
    ///
    /// Checks run in a fixed order: empty window, window longer than the
    /// axis, start outside the axis, then `2 * apron >= axis length`.
    pub fn validate(&self, dims: &LatticeDims) -> Result<(), WindowError> {
        let axis_len = dims.len(self.axis);
        if self.extent == 0 {
            return Err(WindowError::EmptyWindow);
        }
        if self.extent > axis_len {
            return Err(WindowError::WindowTooLarge {
                extent: self.extent,
                axis_len,
            });
        }
        if self.start >= axis_len {
            return Err(WindowError::StartOutOfRange {
                start: self.start,
                axis_len,
            });
        }
        if self.apron.saturating_mul(2) >= axis_len {
            return Err(WindowError::ApronTooWide {
                apron: self.apron,
                axis_len,
            });
        }
        Ok(())
    }

    /// Rows in the tile: `extent + 2 * apron`.
    pub fn tile_len(&self) -> usize {
        self.extent + 2 * self.apron
    }

    /// Tile rows holding interior (non-ghost) data.
    pub fn interior(&self) -> Range<usize> {
        self.apron..self.apron + self.extent
    }

    /// Dimensions of the tile cut from a lattice of `dims`.
    pub fn tile_dims(&self, dims: &LatticeDims) -> LatticeDims {
        dims.with_len(self.axis, self.tile_len())
    }

    /// Master row feeding tile row `t` on an axis of `axis_len` rows.
    pub fn source_row(&self, t: usize, axis_len: usize) -> usize {
        wrap_offset(self.start, t as isize - self.apron as isize, axis_len)
    }

    pub(crate) fn row_map(&self, axis_len: usize) -> RowMap {
        (0..self.tile_len())
            .map(|t| self.source_row(t, axis_len))
            .collect()
    }
}

/// Copy runs of rows between two buffers sharing every axis but `axis`.
///
/// `pairs` yields `(src_row, dst_row)`; both buffers are laid out plane
/// by plane with `words` planes.
pub(crate) fn copy_rows(
    src: &[u32],
    src_dims: &LatticeDims,
    dst: &mut [u32],
    dst_dims: &LatticeDims,
    axis: Axis,
    words: usize,
    pairs: impl Iterator<Item = (usize, usize)> + Clone,
) {
    let (outer, inner) = src_dims.runs(axis);
    debug_assert_eq!(dst_dims.runs(axis), (outer, inner));
    let (src_len, dst_len) = (src_dims.len(axis), dst_dims.len(axis));
    let (src_plane, dst_plane) = (src_dims.site_count(), dst_dims.site_count());
    for w in 0..words {
        for o in 0..outer {
            let src_base = w * src_plane + o * src_len * inner;
            let dst_base = w * dst_plane + o * dst_len * inner;
            for (s, d) in pairs.clone() {
                debug_assert!(s < src_len && d < dst_len);
                let from = src_base + s * inner;
                let to = dst_base + d * inner;
                dst[to..to + inner].copy_from_slice(&src[from..from + inner]);
            }
        }
    }
}

/// Copy the window `spec` of a master buffer into `dst`.
///
/// A pure function over explicit dimensions: `src` holds `words` planes
/// of `dims`, and `dst` must hold `words` planes of
/// `spec.tile_dims(dims)`. Nothing is written unless every check passes.
pub fn copy_window(
    src: &[u32],
    dims: &LatticeDims,
    words: usize,
    spec: &WindowSpec,
    dst: &mut [u32],
) -> Result<(), WindowError> {
    spec.validate(dims)?;
    let expected_src = dims.site_count() * words;
    if src.len() != expected_src {
        return Err(WindowError::Lattice(LatticeError::DataSizeMismatch {
            expected: expected_src,
            actual: src.len(),
        }));
    }
    let tile_dims = spec.tile_dims(dims);
    let expected_dst = tile_dims.site_count() * words;
    if dst.len() != expected_dst {
        return Err(WindowError::BufferSizeMismatch {
            expected: expected_dst,
            actual: dst.len(),
        });
    }
    let rows = spec.row_map(dims.len(spec.axis));
    copy_rows(
        src,
        dims,
        dst,
        &tile_dims,
        spec.axis,
        words,
        rows.iter().copied().zip(0..),
    );
    Ok(())
}

/// A tile cut from a master lattice, apron included.
///
/// Laid out exactly like a [`Lattice`] of [`dims`](Self::dims), so
/// kernels written against the master layout only need to offset by the
/// apron along the window axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBuffer {
    spec: WindowSpec,
    master: LatticeDims,
    dims: LatticeDims,
    words_per_site: usize,
    rows: RowMap,
    data: Vec<u32>,
}

impl TileBuffer {
    /// A zeroed tile for `spec` over a master lattice of `master` dims.
    pub fn new(
        spec: WindowSpec,
        master: LatticeDims,
        words_per_site: usize,
    ) -> Result<Self, WindowError> {
        spec.validate(&master)?;
        if words_per_site == 0 {
            return Err(LatticeError::EmptyLattice.into());
        }
        let dims = spec.tile_dims(&master);
        let len = dims
            .as_array()
            .iter()
            .try_fold(words_per_site, |acc, &n| acc.checked_mul(n))
            .ok_or(LatticeError::DimensionOverflow)?;
        Ok(Self {
            spec,
            master,
            dims,
            words_per_site,
            rows: spec.row_map(master.len(spec.axis)),
            data: vec![0; len],
        })
    }

    /// The window this tile holds.
    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Tile dimensions, apron included.
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    /// Dimensions of the master lattice the tile was cut from.
    pub fn master_dims(&self) -> LatticeDims {
        self.master
    }

    /// Number of word planes.
    pub fn words_per_site(&self) -> usize {
        self.words_per_site
    }

    /// Master row feeding tile row `t`, or `None` past the tile.
    pub fn source_row(&self, t: usize) -> Option<usize> {
        self.rows.get(t).copied()
    }

    /// Word `plane` at tile coordinate `coord`.
    pub fn get(&self, coord: [usize; 3], plane: usize) -> Result<u32, LatticeError> {
        Ok(self.data[self.offset(coord, plane)?])
    }

    /// Overwrite word `plane` at tile coordinate `coord`.
    pub fn set(&mut self, coord: [usize; 3], plane: usize, value: u32) -> Result<(), LatticeError> {
        let i = self.offset(coord, plane)?;
        self.data[i] = value;
        Ok(())
    }

    fn offset(&self, coord: [usize; 3], plane: usize) -> Result<usize, LatticeError> {
        if plane >= self.words_per_site {
            return Err(LatticeError::PlaneOutOfRange {
                plane,
                words_per_site: self.words_per_site,
            });
        }
        Ok(plane * self.dims.site_count() + self.dims.checked_index(coord)?)
    }

    /// Every word, plane by plane.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Mutable view for kernels.
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Copy the interior rows back into the master lattice.
    ///
    /// Ghost rows are discarded. The master must have the dims and word
    /// count the tile was cut from.
    pub fn write_interior(&self, lattice: &mut Lattice) -> Result<(), WindowError> {
        self.check_master(lattice)?;
        let rows = &self.rows;
        let pairs = self.spec.interior().map(|t| (t, rows[t]));
        copy_rows(
            &self.data,
            &self.dims,
            lattice.as_mut_slice(),
            &self.master,
            self.spec.axis,
            self.words_per_site,
            pairs,
        );
        Ok(())
    }

    /// Copy tile rows `tile_rows` onto master rows starting at `master_start`
    /// of `out`, wrapping over the master axis.
    pub(crate) fn write_rows(
        &self,
        out: &mut Lattice,
        tile_rows: Range<usize>,
        master_start: usize,
    ) -> Result<(), WindowError> {
        self.check_master(out)?;
        let axis_len = self.master.len(self.spec.axis);
        let pairs = tile_rows
            .zip(0..)
            .map(move |(t, k)| (t, wrap_offset(master_start, k, axis_len)));
        copy_rows(
            &self.data,
            &self.dims,
            out.as_mut_slice(),
            &self.master,
            self.spec.axis,
            self.words_per_site,
            pairs,
        );
        Ok(())
    }

    fn check_master(&self, lattice: &Lattice) -> Result<(), WindowError> {
        if lattice.dims() != self.master {
            return Err(LatticeError::DimsMismatch {
                expected: self.master.as_array(),
                actual: lattice.dims().as_array(),
            }
            .into());
        }
        let expected = self.master.site_count() * self.words_per_site;
        if lattice.as_slice().len() != expected {
            return Err(LatticeError::DataSizeMismatch {
                expected,
                actual: lattice.as_slice().len(),
            }
            .into());
        }
        Ok(())
    }
}

/// Extract `spec` from `lattice` into a freshly allocated tile.
pub fn extract_window(lattice: &Lattice, spec: WindowSpec) -> Result<TileBuffer, WindowError> {
    let mut tile = TileBuffer::new(spec, lattice.dims(), lattice.words_per_site())?;
    fill_tile(lattice, &mut tile)?;
    Ok(tile)
}

/// Extract `spec` into a caller-provided tile, reusing its allocation.
///
/// The tile must hold exactly as many words as `spec` needs; on success
/// it is re-targeted to `spec`.
pub fn extract_window_into(
    lattice: &Lattice,
    spec: WindowSpec,
    tile: &mut TileBuffer,
) -> Result<(), WindowError> {
    let master = lattice.dims();
    spec.validate(&master)?;
    let dims = spec.tile_dims(&master);
    let expected = dims.site_count() * lattice.words_per_site();
    if tile.data.len() != expected {
        return Err(WindowError::BufferSizeMismatch {
            expected,
            actual: tile.data.len(),
        });
    }
    tile.spec = spec;
    tile.master = master;
    tile.dims = dims;
    tile.words_per_site = lattice.words_per_site();
    tile.rows = spec.row_map(master.len(spec.axis));
    fill_tile(lattice, tile)
}

fn fill_tile(lattice: &Lattice, tile: &mut TileBuffer) -> Result<(), WindowError> {
    copy_window(
        lattice.as_slice(),
        &lattice.dims(),
        lattice.words_per_site(),
        &tile.spec,
        &mut tile.data,
    )?;
    log::trace!(
        "extracted {} window [{}, +{}) apron {} into {} tile",
        tile.spec.axis,
        tile.spec.start,
        tile.spec.extent,
        tile.spec.apron,
        tile.dims
    );
    Ok(())
}
