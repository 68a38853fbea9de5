//! Plane primitives shared by the quadrilateral editor and the triangle explorer.
//!
//! Purpose
//! - Keep the small vector helpers (angles, circle projection, winding) and the
//!   explicit `Bounds`/`EditorCfg` values in one place so the model and solver
//!   never read display state.
//!
//! Conventions
//! - Screen coordinates: x grows right, y grows down. Angles are reported in
//!   degrees. Default vertex layouts wind clockwise on screen.
//! - Tolerances live in `EditorCfg`; helpers take them explicitly.
//!
//! References
//! - Code cross-refs: `crate::model::Quad`, `crate::solver::ConstraintSolver`

mod types;
mod util;

pub use types::{Bounds, EditorCfg, Side, Vertex, DEFAULT_PADDING, DEFAULT_VIEWPORT};
pub use util::{angle_at, clamp_range, cross, perp, project_to_circle, signum_or};

#[cfg(test)]
mod tests;
