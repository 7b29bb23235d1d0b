//! Capsule primitive: a cylinder with hemispherical caps.

use crate::bounds::{check_finite, check_positive, BoundingBox};
use crate::integrate::VolumeEstimate;
use crate::shape::{contains_query_corners, Shape, ShapeKind};
use crate::sphere::Sphere;
use crate::vec3;
use rdme_core::{GeometryError, Point, SiteType};

/// All points within `radius` of the segment `p1..p2`.
///
/// The usual model of a rod-shaped bacterial cell.
#[derive(Clone, Debug)]
pub struct Capsule {
    p1: Point,
    p2: Point,
    radius: f64,
    site_type: SiteType,
    bbox: BoundingBox,
}

impl Capsule {
    /// Create a capsule. The end points must differ and the radius be positive.
    pub fn new(
        p1: Point,
        p2: Point,
        radius: f64,
        site_type: SiteType,
    ) -> Result<Self, GeometryError> {
        for c in p1.iter().chain(p2.iter()) {
            check_finite("endpoint", *c)?;
        }
        check_positive("radius", radius)?;
        if vec3::distance_sq(&p1, &p2) == 0.0 {
            return Err(GeometryError::DegenerateAxis);
        }
        let bbox = BoundingBox::around(p1, [radius; 3])
            .join_with(&BoundingBox::around(p2, [radius; 3]));
        Ok(Self {
            p1,
            p2,
            radius,
            site_type,
            bbox,
        })
    }

    /// First cap centre.
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Second cap centre.
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Capsule {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Capsule
    }

    fn contains_point(&self, p: &Point) -> bool {
        let (d_sq, _) = vec3::segment_distance_sq(p, &self.p1, &self.p2);
        d_sq <= self.radius * self.radius
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        if let Some(s) = query.downcast_ref::<Sphere>() {
            // Sphere inside iff its centre is within (r - rs) of the segment.
            let slack = self.radius - s.radius();
            if slack < 0.0 {
                return false;
            }
            let (d_sq, _) = vec3::segment_distance_sq(&s.center(), &self.p1, &self.p2);
            return d_sq <= slack * slack;
        }
        contains_query_corners(self, query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        if query.kind().is_composite() || query.downcast_ref::<Sphere>().is_some() {
            return query.intersects(self);
        }
        true
    }

    fn volume_estimate(&self, _reintegrate: bool) -> VolumeEstimate {
        let r = self.radius;
        let length = vec3::distance_sq(&self.p1, &self.p2).sqrt();
        let pi = std::f64::consts::PI;
        VolumeEstimate::exact(pi * r * r * length + 4.0 / 3.0 * pi * r * r * r)
    }
}
