use nalgebra::Vector2;
use tracing::trace;

use super::types::{Applied, DragSession, DragState, Rejection};
use super::{unit, ConstraintSolver};
use crate::geom::{clamp_range, perp, project_to_circle, signum_or, Bounds, Side, Vertex};
use crate::model::{ring_orientation, Quad, ShapeVariant};

impl ConstraintSolver {
    /// `Idle → Dragging(side)`; refused for sides the variant does not expose.
    ///
    /// Starting while already dragging replaces the old session.
    pub fn begin_drag(&mut self, quad: &Quad, side: Side, pointer: Vertex) -> Result<(), Rejection> {
        if !quad.variant().is_draggable(side) {
            return Err(Rejection::NotDraggable(side));
        }
        self.state = DragState::Dragging(DragSession {
            side,
            pointer_start: pointer,
            snapshot: *quad.vertices(),
        });
        Ok(())
    }

    /// `Dragging → Idle`; returns the finished session, if any.
    pub fn end_drag(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    /// Recompute the shape for the pointer at `pointer` and commit it if valid.
    pub fn propose_move(
        &self,
        quad: &mut Quad,
        pointer: Vertex,
        bounds: &Bounds,
    ) -> Result<Applied, Rejection> {
        let session = self.session().ok_or(Rejection::NoActiveDrag)?;
        let total = pointer - session.pointer_start;
        let (candidate, clamped) = self.drag_candidate(quad.variant(), session, total, bounds)?;
        self.validate(&candidate, ring_orientation(&session.snapshot))?;
        if !self.contained(&candidate, bounds) {
            // A shape already outside (viewport shrank below it) may still
            // move, as long as it does not stick out further.
            let before = self.excess(&session.snapshot, bounds);
            if before <= self.cfg.eps_contain || self.excess(&candidate, bounds) > before {
                return Err(Rejection::OutOfBounds);
            }
        }
        trace!(side = session.side.label(), dx = total.x, dy = total.y, "drag_commit");
        quad.set_vertices(candidate);
        Ok(Applied { clamped })
    }

    /// Candidate vertices for a total displacement `d` (not validated).
    ///
    /// Returns the candidate and whether the dragged pair had to be translated
    /// back into bounds.
    pub fn drag_candidate(
        &self,
        variant: ShapeVariant,
        session: &DragSession,
        d: Vertex,
        b: &Bounds,
    ) -> Result<([Vertex; 4], bool), Rejection> {
        let s = &session.snapshot;
        let (i1, i2) = session.side.endpoints();
        let (o1, o2) = session.anchored().endpoints();

        // One shared displacement range keeps the dragged side undistorted.
        // The range is empty when the pair already sits outside; the move is
        // then left as is and judged by its excess.
        let shared = |v: f64, lo: f64, hi: f64| {
            if lo <= hi {
                clamp_range(v, lo, hi)
            } else {
                v
            }
        };
        let step = Vector2::new(
            shared(
                d.x,
                (b.min_x - s[i1].x).max(b.min_x - s[i2].x),
                (b.max_x - s[i1].x).min(b.max_x - s[i2].x),
            ),
            shared(
                d.y,
                (b.min_y - s[i1].y).max(b.min_y - s[i2].y),
                (b.max_y - s[i1].y).min(b.max_y - s[i2].y),
            ),
        );

        // Each dragged endpoint pivots around its fixed neighbour; the
        // opposite side keeps its snapshot position.
        let mut c = *s;
        c[i1] = project_to_circle(s[i1] + step, s[o2], (s[i1] - s[o2]).norm());
        c[i2] = project_to_circle(s[i2] + step, s[o1], (s[i2] - s[o1]).norm());

        let mut clamped = false;
        match variant {
            ShapeVariant::Parallelogram => {
                c[i2] = c[i1] + (s[o1] - s[o2]);
            }
            ShapeVariant::Rhombus => {
                let side_len = (s[o1] - s[o2]).norm();
                let leg = unit(c[i1] - s[o2])? * side_len;
                c[i1] = s[o2] + leg;
                c[i2] = s[o1] + leg;
            }
            ShapeVariant::Trapezium => {
                let dir = unit(s[o1] - s[o2])?;
                let n = perp(dir);
                let base = s[o2];
                let start_sign = signum_or((s[i1] - base).dot(&n), 1.0);
                let (mut p, mut q) = (c[i1], c[i2]);

                // Never let the dragged side reach or cross the anchored line.
                let dist = (p - base).dot(&n);
                if !(dist * start_sign > 0.0) {
                    let shift = n * (start_sign * self.cfg.crossing_eps(b) - dist);
                    p += shift;
                    q += shift;
                }

                let len = (q - p).dot(&dir).max(self.cfg.trapezium_min_len(b));
                q = p + dir * len;

                let shift = b.shift_into(p.inf(&q), p.sup(&q));
                if shift != Vertex::zeros() {
                    clamped = true;
                    p += shift;
                    q += shift;
                }
                c[i1] = p;
                c[i2] = q;
            }
        }
        Ok((c, clamped))
    }
}
