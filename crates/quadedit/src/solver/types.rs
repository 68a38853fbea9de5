//! Solver state, request selectors and the rejection taxonomy.
//!
//! Kept small so `drag` and `adjust` read as plain geometry.

use crate::geom::{Side, Vertex};
use crate::model::ShapeVariant;

/// Transient state between pointer-down and pointer-up.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub side: Side,
    /// Pointer position at pointer-down (screen coordinates).
    pub pointer_start: Vertex,
    /// All four vertices at pointer-down; every move is computed from here.
    pub snapshot: [Vertex; 4],
}

impl DragSession {
    /// Side held fixed while this session runs.
    #[inline]
    pub fn anchored(&self) -> Side {
        self.side.opposite()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Which length a button adjusts.
///
/// On a trapezium `Ad` addresses the second parallel side (CD): its legs are
/// derived and never edited directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SidePair {
    Ab,
    Ad,
}

/// Which pair of opposite angles an angle request sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnglePair {
    /// ∠BAD and ∠BCD.
    Ac,
    /// ∠ABC and ∠CDA.
    Bd,
}

/// Result of an accepted mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// The request was capped or the shape translated to stay in bounds.
    pub clamped: bool,
}

/// Why a request left the model untouched.
///
/// None of these are fatal: the previous state stays valid and renderable.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("candidate violates the angle/convexity invariant (angles {angles:?})")]
    InvalidCandidateGeometry { angles: [f64; 4] },
    #[error("candidate leaves the bounds")]
    OutOfBounds,
    #[error("zero-length side or direction")]
    DegenerateInput,
    #[error("side {} is not draggable", .0.label())]
    NotDraggable(Side),
    #[error("no drag in progress")]
    NoActiveDrag,
    #[error("angle {0} is outside 1..=179 degrees")]
    AngleOutOfRange(f64),
    #[error("operation not supported for {}", .0.name())]
    UnsupportedForVariant(ShapeVariant),
    #[error("shape does not fit the bounds")]
    DoesNotFit,
}
