//! Small vector helpers over [`Point`].

use rdme_core::Point;

pub(crate) fn sub(a: &Point, b: &Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot(a: &Point, b: &Point) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm_sq(a: &Point) -> f64 {
    dot(a, a)
}

pub(crate) fn distance_sq(a: &Point, b: &Point) -> f64 {
    norm_sq(&sub(a, b))
}

/// Squared distance from `p` to the segment `a..b`, with the segment parameter `t` in `[0, 1]`.
pub(crate) fn segment_distance_sq(p: &Point, a: &Point, b: &Point) -> (f64, f64) {
    let ab = sub(b, a);
    let len_sq = norm_sq(&ab);
    let t = (dot(&sub(p, a), &ab) / len_sq).clamp(0.0, 1.0);
    let closest = [a[0] + t * ab[0], a[1] + t * ab[1], a[2] + t * ab[2]];
    (distance_sq(p, &closest), t)
}

/// Half-extent along each world axis of a disc of `radius` perpendicular to `axis`.
pub(crate) fn disc_half_extent(axis: &Point, radius: f64) -> [f64; 3] {
    let len_sq = norm_sq(axis);
    let mut out = [0.0; 3];
    for (i, h) in out.iter_mut().enumerate() {
        let cos_sq = axis[i] * axis[i] / len_sq;
        *h = radius * (1.0 - cos_sq).max(0.0).sqrt();
    }
    out
}
