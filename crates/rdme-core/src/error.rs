//! Error types for the rdme lattice substrate.
//!
//! Organized by subsystem: shape construction and integration
//! ([`GeometryError`]), lattice storage ([`LatticeError`]), and
//! periodic window extraction ([`WindowError`]).

use crate::id::Axis;
use std::error::Error;
use std::fmt;

/// Errors from shape construction or integrator configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A parameter was NaN or infinite.
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A length-like parameter was zero or negative.
    NonPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A box had `min > max` along an axis.
    InvertedBounds {
        /// The axis with inverted bounds.
        axis: Axis,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// The two endpoints of an axial shape coincide.
    DegenerateAxis,
    /// An n-ary union was built from zero shapes.
    EmptyUnionSet,
    /// Monte-Carlo integrator configuration is unusable.
    InvalidIntegrator {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { name, value } => write!(f, "{name} must be finite, got {value}"),
            Self::NonPositive { name, value } => write!(f, "{name} must be > 0, got {value}"),
            Self::InvertedBounds { axis, min, max } => {
                write!(f, "inverted bounds on {axis} axis: min {min} > max {max}")
            }
            Self::DegenerateAxis => write!(f, "axis endpoints coincide"),
            Self::EmptyUnionSet => write!(f, "union set needs at least one shape"),
            Self::InvalidIntegrator { reason } => write!(f, "invalid integrator: {reason}"),
        }
    }
}

impl Error for GeometryError {}

/// Errors from lattice construction and site access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// A lattice dimension or the word count was zero.
    EmptyLattice,
    /// `x * y * z * words` does not fit in `usize`.
    DimensionOverflow,
    /// A site coordinate lies outside the lattice.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: [usize; 3],
        /// Lattice dimensions.
        dims: [usize; 3],
    },
    /// A word plane index is not below the lattice's word count.
    PlaneOutOfRange {
        /// Requested plane.
        plane: usize,
        /// Number of planes in the lattice.
        words_per_site: usize,
    },
    /// A backing buffer has the wrong number of words.
    DataSizeMismatch {
        /// Required number of words.
        expected: usize,
        /// Number of words supplied.
        actual: usize,
    },
    /// Two lattices that must share a shape do not.
    DimsMismatch {
        /// Dimensions of the destination.
        expected: [usize; 3],
        /// Dimensions supplied.
        actual: [usize; 3],
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLattice => write!(f, "lattice must have at least one site and one word"),
            Self::DimensionOverflow => write!(f, "lattice size overflows usize"),
            Self::CoordOutOfBounds { coord, dims } => {
                write!(f, "site {coord:?} out of bounds for lattice {dims:?}")
            }
            Self::PlaneOutOfRange {
                plane,
                words_per_site,
            } => write!(f, "word plane {plane} out of range (lattice has {words_per_site})"),
            Self::DataSizeMismatch { expected, actual } => {
                write!(f, "expected {expected} words, got {actual}")
            }
            Self::DimsMismatch { expected, actual } => {
                write!(f, "lattice dims {actual:?} do not match {expected:?}")
            }
        }
    }
}

impl Error for LatticeError {}

/// Errors from periodic window extraction.
///
/// All of these are detected before any site is copied, so a failed
/// extraction never leaves a partially written tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowError {
    /// The window has zero extent.
    EmptyWindow,
    /// The window is longer than the axis it is cut from.
    WindowTooLarge {
        /// Requested window extent.
        extent: usize,
        /// Length of the master lattice axis.
        axis_len: usize,
    },
    /// The window start is not a valid row of the axis.
    StartOutOfRange {
        /// Requested start row.
        start: usize,
        /// Length of the master lattice axis.
        axis_len: usize,
    },
    /// `2 * apron >= axis_len`: apron sources would overlap.
    ApronTooWide {
        /// Requested apron width.
        apron: usize,
        /// Length of the master lattice axis.
        axis_len: usize,
    },
    /// A window is too short to hold both of its aprons when projected.
    ApronExceedsWindow {
        /// Requested apron width.
        apron: usize,
        /// Extent of the offending window.
        extent: usize,
    },
    /// A caller-provided tile buffer has the wrong size.
    BufferSizeMismatch {
        /// Required number of words.
        expected: usize,
        /// Number of words in the buffer.
        actual: usize,
    },
    /// The underlying lattice rejected the request.
    Lattice(LatticeError),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow => write!(f, "window extent must be > 0"),
            Self::WindowTooLarge { extent, axis_len } => {
                write!(f, "window extent {extent} exceeds axis length {axis_len}")
            }
            Self::StartOutOfRange { start, axis_len } => {
                write!(f, "window start {start} outside axis [0, {axis_len})")
            }
            Self::ApronTooWide { apron, axis_len } => {
                write!(
                    f,
                    "apron width {apron} must be less than half the axis length {axis_len}"
                )
            }
            Self::ApronExceedsWindow { apron, extent } => {
                write!(f, "window of {extent} rows cannot hold two aprons of {apron}")
            }
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "tile buffer holds {actual} words, expected {expected}")
            }
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
        }
    }
}

impl Error for WindowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for WindowError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_error_chains_lattice_source() {
        let e = WindowError::from(LatticeError::EmptyLattice);
        assert!(e.source().is_some());
        assert!(e.to_string().contains("at least one site"));
    }

    #[test]
    fn apron_message_names_both_values() {
        let e = WindowError::ApronTooWide {
            apron: 5,
            axis_len: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains('5') && msg.contains("10"));
    }

    #[test]
    fn inverted_bounds_names_axis() {
        let e = GeometryError::InvertedBounds {
            axis: Axis::Z,
            min: 2.0,
            max: 1.0,
        };
        assert!(e.to_string().contains("z axis"));
    }
}
