use tracing::debug;

use super::types::{AnglePair, Applied, Rejection, SidePair};
use super::{unit, ConstraintSolver};
use crate::geom::{Bounds, Vertex};
use crate::model::{
    parallelogram_from, ring_angles_rounded, ring_bbox, ring_orientation, Quad, ShapeVariant,
};

/// Length currently controlled by `pair`.
pub fn controlled_length(variant: ShapeVariant, v: &[Vertex; 4], pair: SidePair) -> f64 {
    match (variant, pair) {
        (_, SidePair::Ab) => (v[1] - v[0]).norm(),
        (ShapeVariant::Trapezium, SidePair::Ad) => (v[2] - v[3]).norm(),
        (_, SidePair::Ad) => (v[3] - v[0]).norm(),
    }
}

/// Vertex set with the controlled side set to `len` and the opposite side
/// updated to match the variant's rules. A stays fixed (D for trapezium CD).
pub fn resized(
    variant: ShapeVariant,
    v: &[Vertex; 4],
    pair: SidePair,
    len: f64,
) -> Result<[Vertex; 4], Rejection> {
    let [a, b, c, d] = *v;
    Ok(match (variant, pair) {
        (ShapeVariant::Parallelogram, SidePair::Ab) => {
            let b2 = a + unit(b - a)? * len;
            [a, b2, d + (b2 - a), d]
        }
        (ShapeVariant::Parallelogram, SidePair::Ad) => {
            let d2 = a + unit(d - a)? * len;
            [a, b, b + (d2 - a), d2]
        }
        (ShapeVariant::Rhombus, _) => {
            let b2 = a + unit(b - a)? * len;
            let d2 = a + unit(d - a)? * len;
            [a, b2, b2 + (d2 - a), d2]
        }
        (ShapeVariant::Trapezium, SidePair::Ab) => {
            let u = unit(b - a)?;
            [a, a + u * len, d + u * (c - d).norm(), d]
        }
        (ShapeVariant::Trapezium, SidePair::Ad) => {
            let w = unit(c - d)?;
            [a, a + w * (b - a).norm(), d + w * len, d]
        }
    })
}

impl ConstraintSolver {
    /// Change the controlled side by `delta` (button press), capping the change
    /// where the invariants would break, then translate the shape into bounds.
    pub fn adjust_length(
        &self,
        quad: &mut Quad,
        pair: SidePair,
        delta: f64,
        bounds: &Bounds,
    ) -> Result<Applied, Rejection> {
        let variant = quad.variant();
        let v = *quad.vertices();
        let current = controlled_length(variant, &v, pair);
        if !(current.is_finite() && current > 0.0) {
            return Err(Rejection::DegenerateInput);
        }
        let target = (current + delta).max(variant.min_adjust_len(&self.cfg, bounds));
        let orient = ring_orientation(&v);
        // A shape larger than the bounds may still change if it gets no larger.
        let base_overflow = self.overflow(&v, bounds);
        let admissible = |cand: &[Vertex; 4]| {
            self.validate(cand, orient).is_ok()
                && (self.fits(cand, bounds) || self.overflow(cand, bounds) <= base_overflow)
        };

        let mut capped = false;
        let mut candidate = resized(variant, &v, pair, target)?;
        if !admissible(&candidate) {
            let start = resized(variant, &v, pair, current)?;
            if !admissible(&start) {
                return Err(Rejection::InvalidCandidateGeometry {
                    angles: ring_angles_rounded(&start),
                });
            }
            // Largest admissible length between `current` and `target`.
            let (mut lo, mut hi) = (current, target);
            for _ in 0..self.cfg.bisect_iters {
                let mid = 0.5 * (lo + hi);
                if admissible(&resized(variant, &v, pair, mid)?) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            debug!(requested = target, capped_at = lo, "length_capped");
            candidate = resized(variant, &v, pair, lo)?;
            capped = true;
        }

        let (lo, hi) = ring_bbox(&candidate);
        let shift = bounds.shift_into(lo, hi);
        for p in &mut candidate {
            *p += shift;
        }
        quad.set_vertices(candidate);
        Ok(Applied {
            clamped: capped || shift != Vertex::zeros(),
        })
    }

    /// Rebuild a parallelogram or rhombus from A so the chosen opposite angles
    /// equal `degrees` (rounded), keeping AB and AD lengths; AB becomes horizontal.
    pub fn set_opposite_angles(
        &self,
        quad: &mut Quad,
        pair: AnglePair,
        degrees: f64,
        bounds: &Bounds,
    ) -> Result<Applied, Rejection> {
        let variant = quad.variant();
        if variant == ShapeVariant::Trapezium {
            return Err(Rejection::UnsupportedForVariant(variant));
        }
        if !(1.0..=179.0).contains(&degrees) {
            return Err(Rejection::AngleOutOfRange(degrees));
        }
        let deg = degrees.round();
        let at_a = match pair {
            AnglePair::Ac => deg,
            AnglePair::Bd => 180.0 - deg,
        };
        let v = *quad.vertices();
        let len_ab = (v[1] - v[0]).norm();
        let len_ad = (v[3] - v[0]).norm();
        let mut candidate = parallelogram_from(v[0], len_ab, len_ad, at_a);
        self.validate(&candidate, ring_orientation(&v))?;
        if !self.fits(&candidate, bounds)
            && self.overflow(&candidate, bounds) > self.overflow(&v, bounds)
        {
            return Err(Rejection::DoesNotFit);
        }
        let (lo, hi) = ring_bbox(&candidate);
        let shift = bounds.shift_into(lo, hi);
        for p in &mut candidate {
            *p += shift;
        }
        quad.set_vertices(candidate);
        Ok(Applied {
            clamped: shift != Vertex::zeros(),
        })
    }
}
