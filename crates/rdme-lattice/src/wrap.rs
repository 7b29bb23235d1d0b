//! Periodic index arithmetic.
//!
//! Every wrapped index is normalised with a true mathematical modulo
//! over the full master-lattice axis, so negative offsets such as
//! `start - apron` land on the opposite face.

/// Map a signed row index onto `[0, len)`.
pub fn wrap(index: isize, len: usize) -> usize {
    debug_assert!(len > 0 && len <= isize::MAX as usize);
    let row = index.rem_euclid(len as isize) as usize;
    debug_assert!(row < len, "wrapped row {row} outside [0, {len})");
    row
}

/// Row `offset` steps away from `base` on a periodic axis of `len` rows.
pub fn wrap_offset(base: usize, offset: isize, len: usize) -> usize {
    wrap(base as isize + offset, len)
}
