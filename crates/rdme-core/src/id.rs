//! Strongly-typed identifiers, the [`Point`] alias, and lattice axes.

use std::fmt;

/// A continuous position in simulation space, `[x, y, z]`.
pub type Point = [f64; 3];

/// Tag painted into the site-type plane of a lattice.
///
/// Regions carry a site type; rasterization writes it into every cell
/// the region contains. `SiteType(0)` is conventionally the background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteType(pub u8);

impl SiteType {
    /// Value stored in a lattice site word for this type.
    pub fn word(self) -> u32 {
        u32::from(self.0)
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for SiteType {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// One of the three lattice axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// Fastest-varying axis in the linear layout.
    X,
    /// Middle axis; rows of `X` sites.
    Y,
    /// Slowest-varying axis; planes of `X * Y` sites.
    Z,
}

impl Axis {
    /// All axes in layout order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in an `[x, y, z]` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_indices_follow_layout_order() {
        let idx: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn site_type_word_widens() {
        assert_eq!(SiteType(255).word(), 255u32);
        assert_eq!(SiteType::from(3).to_string(), "3");
    }
}
