//! Editor controller: routes input events to the solver and reports changes.
//!
//! Purpose
//! - Own the single `Quad`, the `ConstraintSolver` and the current `Bounds`;
//!   translate host input (pointer, buttons, resize) into model mutations and
//!   emit output events for the display layer.
//!
//! Notes
//! - Everything is synchronous. A multi-threaded host must funnel all events
//!   through one owner of `Editor`; there is no internal locking.
//! - `handle_batch` coalesces runs of pointer moves so a burst arriving between
//!   two frames costs one recompute.

use nalgebra::Vector2;
use tracing::{debug, info};

use crate::geom::{Bounds, EditorCfg, Side, Vertex};
use crate::model::{Quad, ShapeVariant};
use crate::solver::{AnglePair, ConstraintSolver, Rejection, SidePair};

/// Button actions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    IncreaseAb,
    DecreaseAb,
    IncreaseAd,
    DecreaseAd,
    Reset,
    SelectShape(ShapeVariant),
    /// Set ∠A and ∠C (degrees).
    SetAnglesAc(f64),
    /// Set ∠B and ∠D (degrees).
    SetAnglesBd(f64),
}

/// Input consumed by the editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// `side` is the side under the pointer, if the host already hit-tested.
    PointerDown { x: f64, y: f64, side: Option<Side> },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    Button(Action),
    Resize { width: f64, height: f64 },
}

/// Output produced for the display layer.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputEvent {
    GeometryChanged {
        vertices: [Vertex; 4],
        angles: [f64; 4],
    },
    /// A request was capped or the shape translated to stay in bounds.
    Clamped,
    /// Side held fixed by the running trapezium drag (None when it ends).
    AnchorChanged(Option<Side>),
}

#[derive(Clone, Debug)]
pub struct Editor {
    quad: Quad,
    solver: ConstraintSolver,
    bounds: Bounds,
    cfg: EditorCfg,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ShapeVariant::default(), Bounds::default(), EditorCfg::default())
    }
}

impl Editor {
    pub fn new(variant: ShapeVariant, bounds: Bounds, cfg: EditorCfg) -> Self {
        Self {
            quad: Quad::new(variant),
            solver: ConstraintSolver::new(cfg),
            bounds,
            cfg,
        }
    }

    /// Editor for a `width × height` viewport with the configured padding.
    pub fn with_viewport(variant: ShapeVariant, width: f64, height: f64, cfg: EditorCfg) -> Self {
        Self::new(variant, Bounds::from_viewport(width, height, cfg.padding), cfg)
    }

    #[inline]
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn solver(&self) -> &ConstraintSolver {
        &self.solver
    }

    /// Snapshot event for the current state (initial draw).
    pub fn snapshot(&self) -> OutputEvent {
        OutputEvent::GeometryChanged {
            vertices: *self.quad.vertices(),
            angles: self.quad.angles(),
        }
    }

    /// Draggable side within the hit half-width of `p`, nearest first.
    pub fn hit_side(&self, p: Vertex) -> Option<Side> {
        let v = self.quad.vertices();
        Side::ALL
            .into_iter()
            .filter(|s| self.quad.variant().is_draggable(*s))
            .map(|s| {
                let (i, j) = s.endpoints();
                (s, distance_to_segment(p, v[i], v[j]))
            })
            .filter(|(_, d)| *d <= self.cfg.hit_half_width)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s)
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<OutputEvent> {
        let mut out = Vec::new();
        match event {
            InputEvent::PointerDown { x, y, side } => {
                let p = Vector2::new(x, y);
                let Some(side) = side.or_else(|| self.hit_side(p)) else {
                    return out;
                };
                match self.solver.begin_drag(&self.quad, side, p) {
                    Ok(()) => {
                        if self.quad.variant() == ShapeVariant::Trapezium {
                            out.push(OutputEvent::AnchorChanged(Some(side.opposite())));
                        }
                    }
                    Err(e) => debug!(error = %e, "pointer_down_ignored"),
                }
            }
            InputEvent::PointerMove { x, y } => {
                if !self.solver.is_dragging() {
                    return out;
                }
                match self
                    .solver
                    .propose_move(&mut self.quad, Vector2::new(x, y), &self.bounds)
                {
                    Ok(applied) => {
                        out.push(self.snapshot());
                        if applied.clamped {
                            out.push(OutputEvent::Clamped);
                        }
                    }
                    Err(e) => debug!(error = %e, "move_rejected"),
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.solver.end_drag().is_some()
                    && self.quad.variant() == ShapeVariant::Trapezium
                {
                    out.push(OutputEvent::AnchorChanged(None));
                }
            }
            InputEvent::Button(action) => self.press(action, &mut out),
            InputEvent::Resize { width, height } => {
                self.bounds = Bounds::from_viewport(width, height, self.cfg.padding);
                if self.solver.is_dragging() {
                    return out;
                }
                let shift = self.quad.fit_shift(&self.bounds);
                if shift != Vertex::zeros() {
                    self.quad.translate(shift);
                    out.push(self.snapshot());
                    out.push(OutputEvent::Clamped);
                }
            }
        }
        out
    }

    /// Handle events in order, collapsing consecutive pointer moves to the last.
    pub fn handle_batch<I>(&mut self, events: I) -> Vec<OutputEvent>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut out = Vec::new();
        let mut pending: Option<InputEvent> = None;
        for ev in events {
            if matches!(ev, InputEvent::PointerMove { .. }) {
                pending = Some(ev);
                continue;
            }
            if let Some(mv) = pending.take() {
                out.extend(self.handle(mv));
            }
            out.extend(self.handle(ev));
        }
        if let Some(mv) = pending {
            out.extend(self.handle(mv));
        }
        out
    }

    fn press(&mut self, action: Action, out: &mut Vec<OutputEvent>) {
        let step = self.cfg.length_step;
        let result = match action {
            Action::IncreaseAb => self.adjust(SidePair::Ab, step),
            Action::DecreaseAb => self.adjust(SidePair::Ab, -step),
            Action::IncreaseAd => self.adjust(SidePair::Ad, step),
            Action::DecreaseAd => self.adjust(SidePair::Ad, -step),
            Action::SetAnglesAc(deg) => self.set_angles(AnglePair::Ac, deg),
            Action::SetAnglesBd(deg) => self.set_angles(AnglePair::Bd, deg),
            Action::Reset => {
                let variant = self.quad.variant();
                self.load(variant, out);
                return;
            }
            Action::SelectShape(variant) => {
                self.load(variant, out);
                return;
            }
        };
        match result {
            Ok(clamped) => {
                out.push(self.snapshot());
                if clamped {
                    out.push(OutputEvent::Clamped);
                }
            }
            Err(e) => debug!(?action, error = %e, "button_rejected"),
        }
    }

    fn adjust(&mut self, pair: SidePair, delta: f64) -> Result<bool, Rejection> {
        self.solver
            .adjust_length(&mut self.quad, pair, delta, &self.bounds)
            .map(|a| a.clamped)
    }

    fn set_angles(&mut self, pair: AnglePair, deg: f64) -> Result<bool, Rejection> {
        self.solver
            .set_opposite_angles(&mut self.quad, pair, deg, &self.bounds)
            .map(|a| a.clamped)
    }

    /// Replace the shape with `variant`'s default, ending any drag.
    fn load(&mut self, variant: ShapeVariant, out: &mut Vec<OutputEvent>) {
        if self.solver.end_drag().is_some() && self.quad.variant() == ShapeVariant::Trapezium {
            out.push(OutputEvent::AnchorChanged(None));
        }
        info!(shape = variant.name(), "shape_loaded");
        self.quad.reset(variant);
        let shift = self.quad.fit_shift(&self.bounds);
        let clamped = shift != Vertex::zeros();
        if clamped {
            self.quad.translate(shift);
        }
        out.push(self.snapshot());
        if clamped {
            out.push(OutputEvent::Clamped);
        }
    }
}

/// Euclidean distance from `p` to the segment `[a, b]`.
pub fn distance_to_segment(p: Vertex, a: Vertex, b: Vertex) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
