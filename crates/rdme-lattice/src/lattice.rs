//! Master lattice storage: one or more `u32` word planes over a 3D grid.

use crate::dims::LatticeDims;
use rdme_core::LatticeError;

/// Dense per-site word storage.
///
/// Word plane `p` of site `(x, y, z)` lives at
/// `p * X*Y*Z + z*X*Y + y*X + x`. Plane [`SITE_TYPE_PLANE`](Self::SITE_TYPE_PLANE)
/// holds site types; [`OCCUPANCY_PLANE`](Self::OCCUPANCY_PLANE), when
/// present, holds particle occupancy.
///
/// # Examples
///
/// ```
/// use rdme_lattice::{Lattice, LatticeDims};
///
/// let dims = LatticeDims::new(4, 3, 2).unwrap();
/// let mut lattice = Lattice::new(dims, 2).unwrap();
/// lattice.set([1, 2, 1], Lattice::OCCUPANCY_PLANE, 7).unwrap();
/// assert_eq!(lattice.get([1, 2, 1], Lattice::OCCUPANCY_PLANE).unwrap(), 7);
/// assert_eq!(lattice.as_slice().len(), 4 * 3 * 2 * 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    dims: LatticeDims,
    words_per_site: usize,
    data: Vec<u32>,
}

impl Lattice {
    /// Plane holding site types.
    pub const SITE_TYPE_PLANE: usize = 0;

    /// Plane holding particle occupancy.
    pub const OCCUPANCY_PLANE: usize = 1;

    /// Create a zeroed lattice with `words_per_site` planes.
    pub fn new(dims: LatticeDims, words_per_site: usize) -> Result<Self, LatticeError> {
        let len = Self::required_len(&dims, words_per_site)?;
        Ok(Self {
            dims,
            words_per_site,
            data: vec![0; len],
        })
    }

    /// Wrap an existing buffer laid out plane by plane.
    pub fn from_words(
        dims: LatticeDims,
        words_per_site: usize,
        data: Vec<u32>,
    ) -> Result<Self, LatticeError> {
        let expected = Self::required_len(&dims, words_per_site)?;
        if data.len() != expected {
            return Err(LatticeError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            dims,
            words_per_site,
            data,
        })
    }

    fn required_len(dims: &LatticeDims, words_per_site: usize) -> Result<usize, LatticeError> {
        if words_per_site == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        dims.site_count()
            .checked_mul(words_per_site)
            .ok_or(LatticeError::DimensionOverflow)
    }

    /// Lattice dimensions.
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    /// Number of word planes.
    pub fn words_per_site(&self) -> usize {
        self.words_per_site
    }

    fn check_plane(&self, plane: usize) -> Result<(), LatticeError> {
        if plane < self.words_per_site {
            Ok(())
        } else {
            Err(LatticeError::PlaneOutOfRange {
                plane,
                words_per_site: self.words_per_site,
            })
        }
    }

    fn offset(&self, coord: [usize; 3], plane: usize) -> Result<usize, LatticeError> {
        self.check_plane(plane)?;
        Ok(plane * self.dims.site_count() + self.dims.checked_index(coord)?)
    }

    /// Word `plane` of the site at `coord`.
    pub fn get(&self, coord: [usize; 3], plane: usize) -> Result<u32, LatticeError> {
        Ok(self.data[self.offset(coord, plane)?])
    }

    /// Overwrite word `plane` of the site at `coord`.
    pub fn set(&mut self, coord: [usize; 3], plane: usize, value: u32) -> Result<(), LatticeError> {
        let i = self.offset(coord, plane)?;
        self.data[i] = value;
        Ok(())
    }

    /// One word plane in linear site order.
    pub fn plane(&self, plane: usize) -> Result<&[u32], LatticeError> {
        self.check_plane(plane)?;
        let n = self.dims.site_count();
        Ok(&self.data[plane * n..(plane + 1) * n])
    }

    /// Mutable access to one word plane.
    pub fn plane_mut(&mut self, plane: usize) -> Result<&mut [u32], LatticeError> {
        self.check_plane(plane)?;
        let n = self.dims.site_count();
        Ok(&mut self.data[plane * n..(plane + 1) * n])
    }

    /// Set every word from `f(coord, plane)`.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut([usize; 3], usize) -> u32,
    {
        let n = self.dims.site_count();
        for (i, word) in self.data.iter_mut().enumerate() {
            *word = f(self.dims.coord_of(i % n), i / n);
        }
    }

    /// Every word, plane by plane.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Mutable view of every word, plane by plane.
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Take the backing buffer.
    pub fn into_words(self) -> Vec<u32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> LatticeDims {
        LatticeDims::new(4, 3, 2).unwrap()
    }

    #[test]
    fn planes_are_contiguous() {
        let mut l = Lattice::new(dims(), 2).unwrap();
        l.set([3, 2, 1], 1, 9).unwrap();
        assert_eq!(l.as_slice()[24 + 23], 9);
        assert_eq!(l.plane(1).unwrap()[23], 9);
        assert!(l.plane(0).unwrap().iter().all(|&w| w == 0));
    }

    #[test]
    fn rejects_bad_plane_and_coord() {
        let mut l = Lattice::new(dims(), 1).unwrap();
        assert_eq!(
            l.get([0, 0, 0], 1),
            Err(LatticeError::PlaneOutOfRange {
                plane: 1,
                words_per_site: 1
            })
        );
        assert!(matches!(
            l.set([4, 0, 0], 0, 1),
            Err(LatticeError::CoordOutOfBounds { .. })
        ));
        assert_eq!(Lattice::new(dims(), 0), Err(LatticeError::EmptyLattice));
    }

    #[test]
    fn from_words_checks_length() {
        assert_eq!(
            Lattice::from_words(dims(), 2, vec![0; 47]),
            Err(LatticeError::DataSizeMismatch {
                expected: 48,
                actual: 47
            })
        );
        let l = Lattice::from_words(dims(), 2, (0..48).collect()).unwrap();
        assert_eq!(l.get([1, 0, 0], 1).unwrap(), 25);
        assert_eq!(l.into_words().len(), 48);
    }

    #[test]
    fn fill_with_passes_coord_and_plane() {
        let mut l = Lattice::new(dims(), 2).unwrap();
        l.fill_with(|[x, y, z], p| (x + 10 * y + 100 * z + 1000 * p) as u32);
        assert_eq!(l.get([2, 1, 1], 0).unwrap(), 112);
        assert_eq!(l.get([2, 1, 1], 1).unwrap(), 1112);
    }
}
