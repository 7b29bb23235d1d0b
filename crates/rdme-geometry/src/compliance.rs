//! Shape trait compliance test helpers.
//!
//! These functions check the invariants every `Shape` must satisfy.
//! Reused across the primitive and composite test modules.

use crate::integrate::{integrate, Convergence, IntegratorConfig};
use crate::shape::Shape;
use crate::sphere::Sphere;
use rdme_core::{Point, SiteType};

const GRID: usize = 16;

/// Sample points on a `GRID`^3 lattice over the shape's box grown by half its extent.
fn sample_points(shape: &dyn Shape) -> Vec<Point> {
    let bbox = shape.bounding_box();
    let (lo, ext) = (bbox.min(), bbox.extent());
    let mut out = Vec::with_capacity(GRID * GRID * GRID);
    for k in 0..GRID {
        for j in 0..GRID {
            for i in 0..GRID {
                let u = [i, j, k].map(|n| (n as f64 + 0.5) / GRID as f64 * 2.0 - 0.5);
                out.push([
                    lo[0] + u[0] * ext[0],
                    lo[1] + u[1] * ext[1],
                    lo[2] + u[2] * ext[2],
                ]);
            }
        }
    }
    out
}

fn sampling_config() -> IntegratorConfig {
    IntegratorConfig {
        threshold: 1e-4,
        batch_size: 4096,
        min_samples: 1 << 17,
        max_samples: 1 << 20,
        seed: 0x5eed,
        workers: Some(1),
    }
}

/// Assert that every contained sample point lies inside the bounding box.
pub fn assert_bounding_box_sound(shape: &dyn Shape) {
    let bbox = shape.bounding_box();
    for p in sample_points(shape) {
        if shape.contains_point(&p) {
            assert!(
                bbox.contains_point(&p),
                "{} contains {p:?} outside its bounding box {bbox:?}",
                shape.kind()
            );
        }
    }
}

/// Assert that some sample point is inside the shape.
pub fn assert_not_empty(shape: &dyn Shape) {
    assert!(
        sample_points(shape).iter().any(|p| shape.contains_point(p)),
        "{} contains none of its sample points",
        shape.kind()
    );
}

/// Assert that a tiny ball around any contained point is reported as overlapping.
pub fn assert_no_missed_overlap(shape: &dyn Shape) {
    for p in sample_points(shape) {
        if !shape.contains_point(&p) {
            continue;
        }
        let tiny = Sphere::new(p, 1e-6, SiteType(0)).unwrap();
        assert!(
            shape.intersects(&tiny),
            "{} contains {p:?} but does not intersect a ball there",
            shape.kind()
        );
        assert!(
            tiny.intersects(shape),
            "ball at {p:?} does not intersect the {} containing it",
            shape.kind()
        );
    }
}

/// Assert that a shape intersects itself.
pub fn assert_self_intersects(shape: &dyn Shape) {
    assert!(shape.intersects(shape), "{} does not intersect itself", shape.kind());
}

/// Assert that a shape does not intersect a ball well outside its box.
pub fn assert_rejects_distant(shape: &dyn Shape) {
    let bbox = shape.bounding_box();
    let far = bbox.max().map(|c| c + 10.0 + bbox.extent().iter().sum::<f64>());
    let ball = Sphere::new(far, 1.0, SiteType(0)).unwrap();
    assert!(!shape.intersects(&ball), "{} intersects a distant ball", shape.kind());
    assert!(!shape.contains_shape(&ball), "{} contains a distant ball", shape.kind());
}

/// Assert that the exact volume agrees with sampling `contains_point`.
pub fn assert_exact_volume_matches_sampling(shape: &dyn Shape) {
    let exact = shape.volume_estimate(false);
    assert_eq!(exact.status, Convergence::Exact, "{} volume is not exact", shape.kind());
    assert_eq!(exact.volume.to_bits(), shape.volume(true).to_bits());
    let sampled = integrate(shape, &sampling_config());
    let rel = (sampled.volume - exact.volume).abs() / exact.volume;
    assert!(
        rel < 0.03,
        "{} exact volume {} but sampling gives {sampled:?}",
        shape.kind(),
        exact.volume
    );
}

/// Assert that a sampled volume is positive and fits in the bounding box.
pub fn assert_sampled_volume_bounded(shape: &dyn Shape) {
    let est = integrate(shape, &sampling_config());
    assert!(est.volume > 0.0, "{} sampled volume is zero", shape.kind());
    assert!(
        est.volume <= shape.bounding_box().volume(),
        "{} sampled volume {} exceeds its box",
        shape.kind(),
        est.volume
    );
}

/// Run every check that applies to an exact primitive.
pub fn run_primitive_compliance(shape: &dyn Shape) {
    assert!(!shape.kind().is_composite());
    assert_bounding_box_sound(shape);
    assert_not_empty(shape);
    assert_no_missed_overlap(shape);
    assert_self_intersects(shape);
    assert_rejects_distant(shape);
    assert_exact_volume_matches_sampling(shape);
}

/// Run every check that applies to a Boolean combinator.
pub fn run_composite_compliance(shape: &dyn Shape) {
    assert!(shape.kind().is_composite());
    assert_bounding_box_sound(shape);
    assert_not_empty(shape);
    assert_no_missed_overlap(shape);
    assert_self_intersects(shape);
    assert_rejects_distant(shape);
    assert_sampled_volume_bounded(shape);
}
