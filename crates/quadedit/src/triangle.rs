//! Triangle angle explorer: three freely draggable vertices.
//!
//! Angles use the law of cosines for A and B and close with C = 180 − A − B,
//! so the displayed sum is exactly 180 even when A and B carry rounding noise.

use nalgebra::Vector2;
use rand::Rng;

use crate::geom::Vertex;

/// Pick radius around a vertex.
pub const HIT_RADIUS: f64 = 15.0;
/// Inset from the canvas edge while dragging.
pub const DRAG_MARGIN: f64 = 20.0;
/// Randomized vertices land in `[lo, hi]²`.
pub const RANDOM_RANGE: (f64, f64) = (60.0, 340.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            v: [
                Vector2::new(100.0, 300.0),
                Vector2::new(300.0, 300.0),
                Vector2::new(200.0, 100.0),
            ],
        }
    }
}

impl Triangle {
    /// Angles at A, B, C in degrees (unrounded). NaN for coincident vertices.
    pub fn angles(&self) -> [f64; 3] {
        let [p0, p1, p2] = self.v;
        let a = (p1 - p2).norm();
        let b = (p0 - p2).norm();
        let c = (p0 - p1).norm();
        let at_a = ((b * b + c * c - a * a) / (2.0 * b * c)).acos().to_degrees();
        let at_b = ((a * a + c * c - b * b) / (2.0 * a * c)).acos().to_degrees();
        [at_a, at_b, 180.0 - at_a - at_b]
    }

    /// First vertex within `HIT_RADIUS` of `p`.
    pub fn hit_vertex(&self, p: Vertex) -> Option<usize> {
        self.v.iter().position(|q| (q - p).norm() < HIT_RADIUS)
    }

    /// Move vertex `i` to `p`, clamped to the canvas inset by `DRAG_MARGIN`.
    pub fn drag_vertex(&mut self, i: usize, p: Vertex, width: f64, height: f64) {
        let Some(q) = self.v.get_mut(i) else {
            return;
        };
        q.x = DRAG_MARGIN.max(p.x.min(width - DRAG_MARGIN));
        q.y = DRAG_MARGIN.max(p.y.min(height - DRAG_MARGIN));
    }

    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let (lo, hi) = RANDOM_RANGE;
        for q in &mut self.v {
            *q = Vector2::new(rng.gen_range(lo..=hi), rng.gen_range(lo..=hi));
        }
    }

    /// `Angles: 45.0°, 45.0°, 90.0° | Sum: 180.0°`
    pub fn summary(&self) -> String {
        let a = self.angles();
        format!(
            "Angles: {:.1}°, {:.1}°, {:.1}° | Sum: {:.1}°",
            a[0],
            a[1],
            a[2],
            a.iter().sum::<f64>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn default_is_isosceles() {
        let t = Triangle::default();
        let [a, b, c] = t.angles();
        assert!((a - b).abs() < 1e-12);
        assert!((a - 63.434948822922).abs() < 1e-9);
        assert!((a + b + c - 180.0).abs() < 1e-12);
        assert_eq!(t.summary(), "Angles: 63.4°, 63.4°, 53.1° | Sum: 180.0°");
    }

    #[test]
    fn hit_and_drag_clamp_to_canvas() {
        let mut t = Triangle::default();
        assert_eq!(t.hit_vertex(vector![105.0, 295.0]), Some(0));
        assert_eq!(t.hit_vertex(vector![150.0, 200.0]), None);
        t.drag_vertex(2, vector![-50.0, 900.0], 400.0, 400.0);
        assert_eq!(t.v[2], vector![20.0, 380.0]);
        // out-of-range index is ignored
        let before = t.clone();
        t.drag_vertex(7, vector![0.0, 0.0], 400.0, 400.0);
        assert_eq!(t, before);
    }

    #[test]
    fn randomize_is_seeded_and_in_range() {
        let mut a = Triangle::default();
        let mut b = Triangle::default();
        a.randomize(&mut StdRng::seed_from_u64(7));
        b.randomize(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        for q in a.v {
            assert!((60.0..=340.0).contains(&q.x) && (60.0..=340.0).contains(&q.y));
        }
    }

    #[test]
    fn collapsed_triangle_has_undefined_angles() {
        let t = Triangle {
            v: [vector![1.0, 1.0]; 3],
        };
        assert!(t.angles()[0].is_nan());
    }
}
