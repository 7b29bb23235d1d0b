//! Solid sphere primitive.

use crate::bounds::{check_finite, check_positive, BoundingBox};
use crate::capsule::Capsule;
use crate::cuboid::Cuboid;
use crate::integrate::VolumeEstimate;
use crate::shape::{contains_query_corners, Shape, ShapeKind};
use crate::vec3;
use rdme_core::{GeometryError, Point, SiteType};

/// A solid ball.
///
/// # Examples
///
/// ```
/// use rdme_geometry::{Shape, Sphere};
/// use rdme_core::SiteType;
///
/// let s = Sphere::new([0.0, 0.0, 0.0], 2.0, SiteType(1)).unwrap();
/// assert!(s.contains_point(&[1.0, 1.0, 1.0]));
/// assert!(!s.contains_point(&[2.0, 2.0, 0.0]));
/// assert_eq!(s.bounding_box().max(), [2.0, 2.0, 2.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Point,
    radius: f64,
    site_type: SiteType,
    bbox: BoundingBox,
}

impl Sphere {
    /// Create a sphere. Fails on non-finite input or a non-positive radius.
    pub fn new(center: Point, radius: f64, site_type: SiteType) -> Result<Self, GeometryError> {
        for c in center {
            check_finite("center", c)?;
        }
        check_positive("radius", radius)?;
        Ok(Self {
            center,
            radius,
            site_type,
            bbox: BoundingBox::around(center, [radius; 3]),
        })
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn contains_point(&self, p: &Point) -> bool {
        vec3::distance_sq(p, &self.center) <= self.radius * self.radius
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        if let Some(other) = query.downcast_ref::<Sphere>() {
            let d = vec3::distance_sq(&self.center, &other.center).sqrt();
            return d + other.radius <= self.radius;
        }
        contains_query_corners(self, query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        if query.kind().is_composite() {
            return query.intersects(self);
        }
        if let Some(other) = query.downcast_ref::<Sphere>() {
            let reach = self.radius + other.radius;
            return vec3::distance_sq(&self.center, &other.center) <= reach * reach;
        }
        if query.downcast_ref::<Cuboid>().is_some() {
            let b = query.bounding_box();
            let (lo, hi) = (b.min(), b.max());
            let closest = [
                self.center[0].clamp(lo[0], hi[0]),
                self.center[1].clamp(lo[1], hi[1]),
                self.center[2].clamp(lo[2], hi[2]),
            ];
            return vec3::distance_sq(&self.center, &closest) <= self.radius * self.radius;
        }
        if let Some(cap) = query.downcast_ref::<Capsule>() {
            let (d_sq, _) = vec3::segment_distance_sq(&self.center, &cap.p1(), &cap.p2());
            let reach = self.radius + cap.radius();
            return d_sq <= reach * reach;
        }
        true
    }

    fn volume_estimate(&self, _reintegrate: bool) -> VolumeEstimate {
        VolumeEstimate::exact(4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3))
    }
}
