//! Axis-aligned bounding boxes.

use rdme_core::{Axis, GeometryError, Point};

/// Axis-aligned box in continuous coordinates.
///
/// Invariant: `min[i] <= max[i]` on every axis and all corners are
/// finite. Boxes are immutable; composites rebuild theirs from their
/// children at construction.
///
/// # Examples
///
/// ```
/// use rdme_geometry::BoundingBox;
///
/// let a = BoundingBox::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
/// let b = BoundingBox::new([2.0, 0.0, 0.0], [3.0, 1.0, 1.0]).unwrap();
/// let joined = a.join_with(&b);
/// assert_eq!(joined.min(), [0.0, 0.0, 0.0]);
/// assert_eq!(joined.max(), [3.0, 1.0, 1.0]);
/// assert!(!a.intersects(&b));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    /// Create a box from its two corners.
    ///
    /// Returns `Err(GeometryError::NonFinite)` for NaN or infinite
    /// corners and `Err(GeometryError::InvertedBounds)` if `min > max`
    /// on any axis.
    pub fn new(min: Point, max: Point) -> Result<Self, GeometryError> {
        for axis in Axis::ALL {
            let i = axis.index();
            check_finite("min", min[i])?;
            check_finite("max", max[i])?;
            if min[i] > max[i] {
                return Err(GeometryError::InvertedBounds {
                    axis,
                    min: min[i],
                    max: max[i],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Box of half-width `half` around `center`. Callers guarantee finite inputs.
    pub(crate) fn around(center: Point, half: [f64; 3]) -> Self {
        Self {
            min: [
                center[0] - half[0],
                center[1] - half[1],
                center[2] - half[2],
            ],
            max: [
                center[0] + half[0],
                center[1] + half[1],
                center[2] + half[2],
            ],
        }
    }

    /// Lower corner.
    pub fn min(&self) -> Point {
        self.min
    }

    /// Upper corner.
    pub fn max(&self) -> Point {
        self.max
    }

    /// Edge lengths along x, y, z.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        let [dx, dy, dz] = self.extent();
        dx * dy * dz
    }

    /// The smallest box containing both `self` and `other`.
    pub fn join_with(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    /// The overlap of `self` and `other`, or `None` if they are disjoint.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BoundingBox {
            min: [
                self.min[0].max(other.min[0]),
                self.min[1].max(other.min[1]),
                self.min[2].max(other.min[2]),
            ],
            max: [
                self.max[0].min(other.max[0]),
                self.max[1].min(other.max[1]),
                self.max[2].min(other.max[2]),
            ],
        })
    }

    /// Returns `true` if the boxes share at least one point (touching counts).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    pub fn contains_point(&self, p: &Point) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// The eight corners, x fastest.
    pub fn corners(&self) -> [Point; 8] {
        let mut out = [[0.0; 3]; 8];
        for (n, corner) in out.iter_mut().enumerate() {
            *corner = [
                if n & 1 == 0 { self.min[0] } else { self.max[0] },
                if n & 2 == 0 { self.min[1] } else { self.max[1] },
                if n & 4 == 0 { self.min[2] } else { self.max[2] },
            ];
        }
        out
    }

    /// Point at fractional position `u` (each component in `[0, 1)`) inside the box.
    pub fn lerp(&self, u: [f64; 3]) -> Point {
        [
            self.min[0] + u[0] * (self.max[0] - self.min[0]),
            self.min[1] + u[1] * (self.max[1] - self.min[1]),
            self.min[2] + u[2] * (self.max[2] - self.min[2]),
        ]
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { name, value })
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}
