//! Quadrilateral model: the four vertices and the active shape variant.
//!
//! Purpose
//! - Single source of truth queried by the renderer and mutated only through
//!   the constraint solver (or wholesale via `reset`).
//!
//! Invariants (maintained by callers, not re-checked here)
//! - Exactly four vertices in cyclic order A, B, C, D.
//! - Committed states are convex, within bounds, and every rounded interior
//!   angle lies in the configured range.

use nalgebra::Vector2;

use crate::geom::{angle_at, cross, Bounds, EditorCfg, Side, Vertex};

/// Which constraints the solver enforces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeVariant {
    #[default]
    Parallelogram,
    Rhombus,
    Trapezium,
}

impl ShapeVariant {
    pub const ALL: [ShapeVariant; 3] = [
        ShapeVariant::Parallelogram,
        ShapeVariant::Rhombus,
        ShapeVariant::Trapezium,
    ];

    /// Fixed default layout for the variant.
    pub fn default_vertices(self) -> [Vertex; 4] {
        match self {
            ShapeVariant::Parallelogram => [
                Vector2::new(150.0, 120.0),
                Vector2::new(400.0, 120.0),
                Vector2::new(480.0, 300.0),
                Vector2::new(230.0, 300.0),
            ],
            ShapeVariant::Rhombus => rhombus_from(Vector2::new(150.0, 120.0), 160.0, 45.0),
            ShapeVariant::Trapezium => [
                Vector2::new(180.0, 110.0),
                Vector2::new(360.0, 110.0),
                Vector2::new(440.0, 300.0),
                Vector2::new(120.0, 300.0),
            ],
        }
    }

    /// Trapezium legs are derived, so only the parallel pair can be dragged.
    #[inline]
    pub fn is_draggable(self, side: Side) -> bool {
        match self {
            ShapeVariant::Parallelogram | ShapeVariant::Rhombus => true,
            ShapeVariant::Trapezium => matches!(side, Side::Ab | Side::Cd),
        }
    }

    /// Floor applied by length adjustments.
    #[inline]
    pub fn min_adjust_len(self, cfg: &EditorCfg, bounds: &Bounds) -> f64 {
        match self {
            ShapeVariant::Parallelogram | ShapeVariant::Rhombus => cfg.min_side,
            ShapeVariant::Trapezium => cfg.trapezium_min_len(bounds),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeVariant::Parallelogram => "parallelogram",
            ShapeVariant::Rhombus => "rhombus",
            ShapeVariant::Trapezium => "trapezium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ShapeVariant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
    }
}

/// Rhombus with corner `a`, AB along +x and AD rotated by `angle_deg` from AB.
pub fn rhombus_from(a: Vertex, side: f64, angle_deg: f64) -> [Vertex; 4] {
    parallelogram_from(a, side, side, angle_deg)
}

/// Parallelogram with corner `a`, AB along +x of length `len_ab`, AD of length
/// `len_ad` rotated by `angle_deg` from AB.
pub fn parallelogram_from(a: Vertex, len_ab: f64, len_ad: f64, angle_deg: f64) -> [Vertex; 4] {
    let t = angle_deg.to_radians();
    let b = a + Vector2::new(len_ab, 0.0);
    let ad = Vector2::new(t.cos(), t.sin()) * len_ad;
    [a, b, b + ad, a + ad]
}

/// Interior angles of an arbitrary vertex ring, unrounded.
pub fn ring_angles(v: &[Vertex; 4]) -> [f64; 4] {
    std::array::from_fn(|i| angle_at(v[i], v[(i + 1) % 4], v[(i + 3) % 4]))
}

/// Interior angles rounded to whole degrees (the displayed and validated values).
pub fn ring_angles_rounded(v: &[Vertex; 4]) -> [f64; 4] {
    ring_angles(v).map(f64::round)
}

/// Sign of the winding: +1 when every turn has positive cross product, −1 when
/// every turn is negative, 0 otherwise (non-convex, degenerate or bow-tie).
pub fn ring_orientation(v: &[Vertex; 4]) -> i8 {
    let mut pos = 0;
    let mut neg = 0;
    for i in 0..4 {
        let e1 = v[(i + 1) % 4] - v[i];
        let e2 = v[(i + 2) % 4] - v[(i + 1) % 4];
        let z = cross(e1, e2);
        if z > 0.0 {
            pos += 1;
        } else if z < 0.0 {
            neg += 1;
        }
    }
    // Four same-sign turns can still wind twice; the signed area rules that out.
    let area = signed_area(v);
    match (pos, neg) {
        (4, 0) if area > 0.0 => 1,
        (0, 4) if area < 0.0 => -1,
        _ => 0,
    }
}

/// Shoelace area (positive for a clockwise-on-screen ring in y-down coordinates).
pub fn signed_area(v: &[Vertex; 4]) -> f64 {
    0.5 * (0..4).map(|i| cross(v[i], v[(i + 1) % 4])).sum::<f64>()
}

/// Axis-aligned bounding box `(min, max)` of a vertex ring.
pub fn ring_bbox(v: &[Vertex; 4]) -> (Vertex, Vertex) {
    let mut lo = v[0];
    let mut hi = v[0];
    for p in &v[1..] {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    (lo, hi)
}

/// The editable quadrilateral.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    variant: ShapeVariant,
    v: [Vertex; 4],
}

impl Default for Quad {
    fn default() -> Self {
        Self::new(ShapeVariant::default())
    }
}

impl Quad {
    pub fn new(variant: ShapeVariant) -> Self {
        Self {
            variant,
            v: variant.default_vertices(),
        }
    }

    #[inline]
    pub fn variant(&self) -> ShapeVariant {
        self.variant
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.v
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vertex {
        self.v[i % 4]
    }

    /// Rounded interior angles at A, B, C, D.
    pub fn angles(&self) -> [f64; 4] {
        ring_angles_rounded(&self.v)
    }

    pub fn raw_angles(&self) -> [f64; 4] {
        ring_angles(&self.v)
    }

    #[inline]
    pub fn side_vector(&self, side: Side) -> Vertex {
        let (i, j) = side.endpoints();
        self.v[j] - self.v[i]
    }

    #[inline]
    pub fn side_length(&self, side: Side) -> f64 {
        self.side_vector(side).norm()
    }

    /// Replace the vertices; validation is the solver's job.
    pub fn set_vertices(&mut self, v: [Vertex; 4]) {
        debug_assert!(
            v.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
            "non-finite vertex committed"
        );
        self.v = v;
    }

    /// Load the default layout of `variant` (and switch to it).
    pub fn reset(&mut self, variant: ShapeVariant) {
        self.variant = variant;
        self.v = variant.default_vertices();
    }

    #[inline]
    pub fn bbox(&self) -> (Vertex, Vertex) {
        ring_bbox(&self.v)
    }

    pub fn translate(&mut self, d: Vertex) {
        for p in &mut self.v {
            *p += d;
        }
    }

    pub fn within(&self, b: &Bounds, eps: f64) -> bool {
        self.v.iter().all(|p| b.contains_eps(*p, eps))
    }

    #[inline]
    pub fn orientation(&self) -> i8 {
        ring_orientation(&self.v)
    }

    #[inline]
    pub fn is_convex(&self) -> bool {
        self.orientation() != 0
    }

    /// Uniform translation that brings the shape inside `b` (zero if already inside).
    pub fn fit_shift(&self, b: &Bounds) -> Vertex {
        let (lo, hi) = self.bbox();
        b.shift_into(lo, hi)
    }
}
