//! Axis-aligned solid box primitive.

use crate::bounds::BoundingBox;
use crate::integrate::VolumeEstimate;
use crate::shape::{Shape, ShapeKind};
use crate::sphere::Sphere;
use rdme_core::{GeometryError, Point, SiteType};

/// An axis-aligned solid box. Its bounding box is the shape itself.
#[derive(Clone, Debug)]
pub struct Cuboid {
    bbox: BoundingBox,
    site_type: SiteType,
}

impl Cuboid {
    /// Create a cuboid spanning `min..=max`.
    pub fn new(min: Point, max: Point, site_type: SiteType) -> Result<Self, GeometryError> {
        Ok(Self {
            bbox: BoundingBox::new(min, max)?,
            site_type,
        })
    }

    /// Create a cuboid covering an existing bounding box.
    pub fn from_box(bbox: BoundingBox, site_type: SiteType) -> Self {
        Self { bbox, site_type }
    }
}

impl Shape for Cuboid {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Cuboid
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.bbox.contains_point(p)
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        self.bbox.contains_box(query.bounding_box())
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
        VolumeEstimate::exact(self.bbox.volume())
    }
}
