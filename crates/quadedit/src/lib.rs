//! Interactive geometry for classroom angle explorers.
//!
//! The core is a constrained quadrilateral editor: drag a side of a
//! parallelogram, rhombus or trapezium and the shape keeps its defining
//! invariants (anchored opposite side, parallel sides, equal sides, angle
//! bounds, viewport containment). Two small triangle explorers ride along:
//! free vertex dragging (`triangle`) and three movable copies of a triangle
//! built from chosen angles (`angle_line`).
//!
//! Layering
//! - `geom`: vectors, bounds, tolerances.
//! - `model`: the `Quad` and its shape variants (queries only).
//! - `solver`: drag state machine and length/angle requests.
//! - `editor`: event routing for a host UI.
//! - `render`: scene/SVG output from model queries.

pub mod angle_line;
pub mod editor;
pub mod geom;
pub mod model;
pub mod render;
pub mod solver;
pub mod triangle;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angle_line::AngleLine;
    pub use crate::editor::{Action, Editor, InputEvent, OutputEvent};
    pub use crate::geom::{Bounds, EditorCfg, Side, Vertex};
    pub use crate::model::{Quad, ShapeVariant};
    pub use crate::render::{render, Scene};
    pub use crate::solver::{AnglePair, Applied, ConstraintSolver, Rejection, SidePair};
    pub use crate::triangle::Triangle;
}
