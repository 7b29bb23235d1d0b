//! Boolean intersection of two shapes.

use crate::bounds::BoundingBox;
use crate::integrate::{integrate, IntegratorConfig, VolumeCache, VolumeEstimate};
use crate::shape::{Shape, ShapeKind};
use rdme_core::{GeometryError, Point, SiteType};

/// The set of points inside both children.
///
/// The bounding box is the overlap of the children's boxes. Disjoint
/// children produce a zero-volume box at the first child's lower corner,
/// and the intersection contains no points.
///
/// [`intersects`](Shape::intersects) requires both children to intersect
/// the query. That is necessary but not sufficient, so it may report an
/// overlap that does not exist; it never misses one.
#[derive(Debug)]
pub struct Intersection {
    first: Box<dyn Shape>,
    second: Box<dyn Shape>,
    site_type: SiteType,
    bbox: BoundingBox,
    integrator: IntegratorConfig,
    volume: VolumeCache,
}

impl Intersection {
    /// Intersect two shapes, painting `site_type` where the result wins.
    pub fn new(first: Box<dyn Shape>, second: Box<dyn Shape>, site_type: SiteType) -> Self {
        let bbox = first
            .bounding_box()
            .intersection(second.bounding_box())
            .unwrap_or_else(|| BoundingBox::around(first.bounding_box().min(), [0.0; 3]));
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

    /// The first child.
    pub fn first(&self) -> &dyn Shape {
        self.first.as_ref()
    }

    /// The second child.
    pub fn second(&self) -> &dyn Shape {
        self.second.as_ref()
    }
}

impl Shape for Intersection {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Intersection
    }

    fn contains_point(&self, p: &Point) -> bool {
        self.first.contains_point(p) && self.second.contains_point(p)
    }

    fn contains_shape(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.contains_shape(query) && self.second.contains_shape(query)
    }

    fn intersects(&self, query: &dyn Shape) -> bool {
        if !self.bounding_boxes_intersect(query) {
            return false;
        }
        self.first.intersects(query) && self.second.intersects(query)
    }

    fn volume_estimate(&self, reintegrate: bool) -> VolumeEstimate {
        self.volume.get_or_integrate(reintegrate, |run| {
            integrate(self, &self.integrator.reseeded(run))
        })
    }
}
