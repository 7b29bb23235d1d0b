//! Solid right circular cylinder between two end points.

use crate::bounds::{check_finite, check_positive, BoundingBox};
use crate::integrate::VolumeEstimate;
use crate::shape::{contains_query_corners, Shape, ShapeKind};
use crate::vec3;
use rdme_core::{GeometryError, Point, SiteType};

/// A flat-capped cylinder whose axis runs from `p1` to `p2`.
#[derive(Clone, Debug)]
pub struct Cylinder {
    p1: Point,
    p2: Point,
    radius: f64,
    site_type: SiteType,
    bbox: BoundingBox,
}

impl Cylinder {
    /// Create a cylinder. The end points must differ and the radius be positive.
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
        let axis = vec3::sub(&p2, &p1);
        if vec3::norm_sq(&axis) == 0.0 {
            return Err(GeometryError::DegenerateAxis);
        }
        let half = vec3::disc_half_extent(&axis, radius);
        let bbox = BoundingBox::around(p1, half).join_with(&BoundingBox::around(p2, half));
        Ok(Self {
            p1,
            p2,
            radius,
            site_type,
            bbox,
        })
    }

    /// Axis length.
    pub fn length(&self) -> f64 {
        vec3::norm_sq(&vec3::sub(&self.p2, &self.p1)).sqrt()
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Cylinder {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn contains_point(&self, p: &Point) -> bool {
        let axis = vec3::sub(&self.p2, &self.p1);
        let rel = vec3::sub(p, &self.p1);
        let len_sq = vec3::norm_sq(&axis);
        let along = vec3::dot(&rel, &axis);
        if along < 0.0 || along > len_sq {
            return false;
        }
        // Squared radial distance: |rel|^2 - (rel.axis)^2 / |axis|^2
        let radial_sq = vec3::norm_sq(&rel) - along * along / len_sq;
        radial_sq <= self.radius * self.radius
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        self.bounding_boxes_intersect(query) && contains_query_corners(self, query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        if query.kind().is_composite() {
            return query.intersects(self);
        }
        true
    }

    fn volume_estimate(&self, _reintegrate: bool) -> VolumeEstimate {
        VolumeEstimate::exact(std::f64::consts::PI * self.radius * self.radius * self.length())
    }
}
