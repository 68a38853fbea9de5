//! Constraint solver: turns pointer and button input into a valid vertex set.
//!
//! Purpose
//! - Own the drag state machine (`Idle` ↔ `Dragging(side)`) and the
//!   per-variant reconciliation rules; commit to `Quad` only what passes
//!   validation, otherwise leave the model untouched.
//!
//! Why this design
//! - Moves are recomputed from the drag-start snapshot plus the total pointer
//!   displacement, so repeated events never accumulate drift.
//! - Validation compares *rounded* angles against the bounds, the same values
//!   the display shows (29.6° passes as 30°, 29.4° fails as 29°).
//!
//! References
//! - Code cross-refs: `model::{Quad, ShapeVariant}`, `geom::{Bounds, EditorCfg}`

mod adjust;
mod drag;
mod types;

pub use types::{AnglePair, Applied, DragSession, DragState, Rejection, SidePair};

use crate::geom::{Bounds, EditorCfg, Vertex};
use crate::model::{ring_angles_rounded, ring_bbox, ring_orientation};

#[derive(Clone, Debug, Default)]
pub struct ConstraintSolver {
    cfg: EditorCfg,
    state: DragState,
}

impl ConstraintSolver {
    pub fn new(cfg: EditorCfg) -> Self {
        Self {
            cfg,
            state: DragState::Idle,
        }
    }

    #[inline]
    pub fn cfg(&self) -> &EditorCfg {
        &self.cfg
    }

    #[inline]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Angle bounds plus convexity with the winding of `reference`.
    pub fn validate(&self, candidate: &[Vertex; 4], reference: i8) -> Result<(), Rejection> {
        let angles = ring_angles_rounded(candidate);
        if !angles.iter().all(|a| self.cfg.angle_ok(*a)) {
            return Err(Rejection::InvalidCandidateGeometry { angles });
        }
        let o = ring_orientation(candidate);
        if o == 0 || (reference != 0 && o != reference) {
            return Err(Rejection::InvalidCandidateGeometry { angles });
        }
        Ok(())
    }

    /// Bounding box no larger than the bounds (a uniform translation can fit it).
    pub fn fits(&self, candidate: &[Vertex; 4], bounds: &Bounds) -> bool {
        let (lo, hi) = ring_bbox(candidate);
        let eps = self.cfg.eps_contain;
        hi.x - lo.x <= bounds.span_x() + eps && hi.y - lo.y <= bounds.span_y() + eps
    }

    pub fn contained(&self, candidate: &[Vertex; 4], bounds: &Bounds) -> bool {
        candidate
            .iter()
            .all(|p| bounds.contains_eps(*p, self.cfg.eps_contain))
    }

    /// Size excess of the bounding box over the bounds (see `Bounds::overflow`).
    pub fn overflow(&self, candidate: &[Vertex; 4], bounds: &Bounds) -> f64 {
        let (lo, hi) = ring_bbox(candidate);
        bounds.overflow(lo, hi)
    }

    /// Distance the bounding box sticks out of the bounds (see `Bounds::excess`).
    pub fn excess(&self, candidate: &[Vertex; 4], bounds: &Bounds) -> f64 {
        let (lo, hi) = ring_bbox(candidate);
        bounds.excess(lo, hi)
    }
}

#[inline]
pub(crate) fn unit(v: Vertex) -> Result<Vertex, Rejection> {
    let n = v.norm();
    if n.is_finite() && n > 0.0 {
        Ok(v / n)
    } else {
        Err(Rejection::DegenerateInput)
    }
}
