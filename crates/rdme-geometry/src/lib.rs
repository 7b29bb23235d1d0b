//! Constructive solid geometry for rdme simulation regions.
//!
//! Regions are trees of [`Shape`]s: exact primitives ([`Sphere`],
//! [`Cuboid`], [`Cylinder`], [`Capsule`]) combined by the Boolean
//! combinators [`Union`], [`UnionSet`], [`Intersection`] and
//! [`Difference`]. Every shape carries a [`BoundingBox`] used to prune
//! queries before any exact test runs.
//!
//! Composites have no closed-form volume. They estimate it by
//! Monte-Carlo sampling of their bounding box ([`integrate`]) and cache
//! the result until asked to reintegrate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod capsule;
pub mod cuboid;
pub mod cylinder;
pub mod difference;
pub mod integrate;
pub mod intersection;
pub mod shape;
pub mod sphere;
pub mod union;
pub mod union_set;
mod vec3;

#[cfg(test)]
pub(crate) mod compliance;

pub use bounds::BoundingBox;
pub use capsule::Capsule;
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use difference::Difference;
pub use integrate::{integrate, Convergence, IntegratorConfig, VolumeCache, VolumeEstimate};
pub use intersection::Intersection;
pub use shape::{Shape, ShapeKind};
pub use sphere::Sphere;
pub use union::Union;
pub use union_set::UnionSet;
