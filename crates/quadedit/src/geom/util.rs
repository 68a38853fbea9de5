use nalgebra::Vector2;

use super::types::Vertex;

/// Angle at `p` between `p → p1` and `p → p2`, in degrees, unrounded.
///
/// NaN when either neighbour coincides with `p`.
#[inline]
pub fn angle_at(p: Vertex, p1: Vertex, p2: Vertex) -> f64 {
    let v1 = p1 - p;
    let v2 = p2 - p;
    let cos = v1.dot(&v2) / (v1.norm() * v2.norm());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Move `point` onto the circle of `radius` around `center`, keeping its direction.
///
/// A point sitting on the center has no direction; it lands on the +x axis.
#[inline]
pub fn project_to_circle(point: Vertex, center: Vertex, radius: f64) -> Vertex {
    let v = point - center;
    let mag = v.norm();
    if mag == 0.0 {
        return center + Vector2::new(radius, 0.0);
    }
    center + v * (radius / mag)
}

/// `max(lo, min(hi, v))`; never panics, an empty range resolves to `lo`.
#[inline]
pub fn clamp_range(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// z-component of `a × b`.
#[inline]
pub fn cross(a: Vertex, b: Vertex) -> f64 {
    a.x * b.y - a.y * b.x
}

/// `v` rotated by +90° (in a y-down frame this turns clockwise on screen).
#[inline]
pub fn perp(v: Vertex) -> Vertex {
    Vector2::new(-v.y, v.x)
}

/// Sign of `v` as ±1, with `zero` returned for exactly 0 (and NaN).
#[inline]
pub fn signum_or(v: f64, zero: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        zero
    }
}
