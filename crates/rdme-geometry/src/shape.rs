//! The core `Shape` trait and `dyn Shape` downcast support.

use crate::bounds::BoundingBox;
use crate::integrate::VolumeEstimate;
use rdme_core::{Point, SiteType};
use std::any::Any;
use std::fmt;

/// Which concrete variant a shape is.
///
/// Used for diagnostics and for deciding whether a primitive should
/// hand a shape-vs-shape query over to a composite query shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Sphere`](crate::Sphere).
    Sphere,
    /// [`Cuboid`](crate::Cuboid).
    Cuboid,
    /// [`Cylinder`](crate::Cylinder).
    Cylinder,
    /// [`Capsule`](crate::Capsule).
    Capsule,
    /// [`Union`](crate::Union).
    Union,
    /// [`UnionSet`](crate::UnionSet).
    UnionSet,
    /// [`Intersection`](crate::Intersection).
    Intersection,
    /// [`Difference`](crate::Difference).
    Difference,
}

impl ShapeKind {
    /// Returns `true` for the Boolean combinators.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            Self::Union | Self::UnionSet | Self::Intersection | Self::Difference
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sphere => "sphere",
            Self::Cuboid => "cuboid",
            Self::Cylinder => "cylinder",
            Self::Capsule => "capsule",
            Self::Union => "union",
            Self::UnionSet => "union_set",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        };
        f.write_str(name)
    }
}

/// A solid region of simulation space.
///
/// Primitives implement every test exactly where the geometry is
/// tractable. Composites combine two (or, for [`UnionSet`](crate::UnionSet),
/// several) exclusively owned children and estimate their volume by
/// Monte-Carlo sampling.
///
/// # Object Safety
///
/// Designed for use as `Box<dyn Shape>`. Use `downcast_ref` on
/// `dyn Shape` for pairwise fast paths on concrete types.
///
/// # Thread Safety
///
/// `Sync` is required so a scene can be rasterized and integrated from
/// several worker threads at once. The only interior mutability is the
/// composites' volume cache.
pub trait Shape: Any + Send + Sync + 'static {
    /// The axis-aligned box enclosing the shape.
    fn bounding_box(&self) -> &BoundingBox;

    /// Site type painted where this shape wins a containment query.
    fn site_type(&self) -> SiteType;

    /// The concrete variant.
    fn kind(&self) -> ShapeKind;

    /// Returns `true` if `p` lies inside the shape.
    fn contains_point(&self, p: &Point) -> bool;

    /// Returns `true` if `query` lies entirely inside this shape.
    ///
    /// Implementations may return false negatives (see
    /// [`Union`](crate::Union)) but never false positives.
    fn contains_shape(&self, query: &dyn Shape) -> bool;

    /// Returns `true` if this shape and `query` overlap.
    fn intersects(&self, query: &dyn Shape) -> bool;

    /// Volume of the shape together with how it was obtained.
    ///
    /// Exact for primitives. Composites integrate on first call or when
    /// `reintegrate` is set, and otherwise return the cached estimate.
    fn volume_estimate(&self, reintegrate: bool) -> VolumeEstimate;

    /// Volume of the shape; see [`volume_estimate`](Self::volume_estimate).
    fn volume(&self, reintegrate: bool) -> f64 {
        self.volume_estimate(reintegrate).volume
    }

    /// Cheap reject: do the two bounding boxes overlap?
    fn bounding_boxes_intersect(&self, query: &dyn Shape) -> bool {
        self.bounding_box().intersects(query.bounding_box())
    }
}

impl dyn Shape {
    /// Attempt to downcast a trait object to a concrete shape type.
    pub fn downcast_ref<T: Shape>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("kind", &self.kind())
            .field("site_type", &self.site_type())
            .field("bounding_box", self.bounding_box())
            .finish()
    }
}

/// Sound containment test for convex shapes: every corner of the query's
/// bounding box lies inside `outer`.
///
/// Exact when the query is itself an axis-aligned box.
pub(crate) fn contains_query_corners(outer: &dyn Shape, query: &dyn Shape) -> bool {
    query
        .bounding_box()
        .corners()
        .iter()
        .all(|c| outer.contains_point(c))
}
