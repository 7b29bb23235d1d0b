//! Lattice dimensions and the linear site layout.

use rdme_core::{Axis, LatticeError};
use std::fmt;

/// Extent of a lattice along x, y and z.
///
/// Sites are laid out x fastest: `index = z*X*Y + y*X + x`. All three
/// extents are non-zero and their product fits in `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LatticeDims {
    x: usize,
    y: usize,
    z: usize,
}

impl LatticeDims {
    /// Create dimensions.
    ///
    /// Returns `Err(LatticeError::EmptyLattice)` if any extent is zero,
    /// or `Err(LatticeError::DimensionOverflow)` if the site count
    /// overflows `usize`.
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self, LatticeError> {
        if x == 0 || y == 0 || z == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        x.checked_mul(y)
            .and_then(|xy| xy.checked_mul(z))
            .ok_or(LatticeError::DimensionOverflow)?;
        Ok(Self { x, y, z })
    }

    /// Extents as `[x, y, z]`.
    pub fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Extent along `axis`.
    pub fn len(&self, axis: Axis) -> usize {
        self.as_array()[axis.index()]
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Distance in the linear layout between neighbouring rows of `axis`.
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => 1,
            Axis::Y => self.x,
            Axis::Z => self.x * self.y,
        }
    }

    /// Linear index of an in-bounds site. Callers guarantee the bounds.
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.x && y < self.y && z < self.z);
        z * self.x * self.y + y * self.x + x
    }

    /// Linear index of `coord`, checking bounds.
    pub fn checked_index(&self, coord: [usize; 3]) -> Result<usize, LatticeError> {
        let [x, y, z] = coord;
        if x >= self.x || y >= self.y || z >= self.z {
            return Err(LatticeError::CoordOutOfBounds {
                coord,
                dims: self.as_array(),
            });
        }
        Ok(self.index(x, y, z))
    }

    /// Coordinate of a linear index.
    pub fn coord_of(&self, index: usize) -> [usize; 3] {
        let xy = self.x * self.y;
        [index % self.x, (index % xy) / self.x, index / xy]
    }

    /// The same dimensions with `axis` replaced by `len` (which must be non-zero).
    pub(crate) fn with_len(&self, axis: Axis, len: usize) -> Self {
        debug_assert!(len > 0);
        let mut d = *self;
        match axis {
            Axis::X => d.x = len,
            Axis::Y => d.y = len,
            Axis::Z => d.z = len,
        }
        d
    }

    /// Decompose the layout around `axis` into `(outer, inner)`: the
    /// number of runs per row and the contiguous run length.
    pub(crate) fn runs(&self, axis: Axis) -> (usize, usize) {
        let inner = self.stride(axis);
        (self.site_count() / (inner * self.len(axis)), inner)
    }
}

impl fmt::Display for LatticeDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
