//! Boolean difference of two shapes.

use crate::bounds::BoundingBox;
use crate::integrate::{integrate, IntegratorConfig, VolumeCache, VolumeEstimate};
use crate::shape::{Shape, ShapeKind};
use rdme_core::{GeometryError, Point, SiteType};

/// Points inside `first` but not inside `second`.
///
/// The bounding box is the first child's; subtraction never grows a shape.
#[derive(Debug)]
pub struct Difference {
    first: Box<dyn Shape>,
    second: Box<dyn Shape>,
    site_type: SiteType,
    bbox: BoundingBox,
    integrator: IntegratorConfig,
    volume: VolumeCache,
}

impl Difference {
    /// Subtract `second` from `first`, painting `site_type` where the result wins.
    pub fn new(first: Box<dyn Shape>, second: Box<dyn Shape>, site_type: SiteType) -> Self {
        let bbox = *first.bounding_box();
        Self {
            first,
            second,
            site_type,
            bbox,
            integrator: IntegratorConfig::default(),
            volume: VolumeCache::new(),
        }
    }

    /// Replace the Monte-Carlo settings used by [`volume`](Shape::volume).
    pub fn with_integrator(mut self, config: IntegratorConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        self.integrator = config;
        Ok(self)
    }

    /// The shape being carved.
    pub fn first(&self) -> &dyn Shape {
        self.first.as_ref()
    }

    /// The shape removed from `first`.
    pub fn second(&self) -> &dyn Shape {
        self.second.as_ref()
    }
}

impl Shape for Difference {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Difference
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.first.contains_point(p) && !self.second.contains_point(p)
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.contains_shape(query) && !self.second.intersects(query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.intersects(query) && !self.second.contains_shape(query)
    }

    fn volume_estimate(&self, reintegrate: bool) -> VolumeEstimate {
        self.volume.get_or_integrate(reintegrate, |run| {
            integrate(self, &self.integrator.reseeded(run))
        })
    }
}
