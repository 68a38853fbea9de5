//! Basic plane types and tolerances.
//!
//! - `Vertex`: a point in screen coordinates.
//! - `Side`: one of the four sides of a quadrilateral in cyclic order.
//! - `Bounds`: the padded viewport rectangle vertices must stay within.
//! - `EditorCfg`: centralizes angle bounds, minimum lengths and epsilons.

use nalgebra::Vector2;

/// A point in screen coordinates.
pub type Vertex = Vector2<f64>;

/// Padding between the viewport edge and the usable region.
pub const DEFAULT_PADDING: f64 = 40.0;

/// Viewport used when the host reports no size.
pub const DEFAULT_VIEWPORT: (f64, f64) = (700.0, 500.0);

/// Side `i` joins vertex `i` to vertex `(i + 1) mod 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Ab,
    Bc,
    Cd,
    Da,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Ab, Side::Bc, Side::Cd, Side::Da];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Ab => 0,
            Side::Bc => 1,
            Side::Cd => 2,
            Side::Da => 3,
        }
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Side> {
        Side::ALL.get(i).copied()
    }

    /// Vertex indices `(i, i + 1)`.
    #[inline]
    pub fn endpoints(self) -> (usize, usize) {
        let i = self.index();
        (i, (i + 1) % 4)
    }

    #[inline]
    pub fn opposite(self) -> Side {
        Side::ALL[(self.index() + 2) % 4]
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Ab => "AB",
            Side::Bc => "BC",
            Side::Cd => "CD",
            Side::Da => "DA",
        }
    }
}

/// Rectangle `[min_x, max_x] × [min_y, max_y]` plus the viewport it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Usable region of a `width × height` viewport.
    ///
    /// Sizes that are missing (non-finite or non-positive) fall back to
    /// `DEFAULT_VIEWPORT`; sizes are floored at 200 and every range is at
    /// least 10 wide.
    pub fn from_viewport(width: f64, height: f64, padding: f64) -> Self {
        let pick = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 {
                v.max(200.0)
            } else {
                fallback
            }
        };
        let width = pick(width, DEFAULT_VIEWPORT.0);
        let height = pick(height, DEFAULT_VIEWPORT.1);
        Self {
            min_x: padding,
            max_x: (padding + 10.0).max(width - padding),
            min_y: padding,
            max_y: (padding + 10.0).max(height - padding),
            width,
            height,
        }
    }

    #[inline]
    pub fn min_dim(&self) -> f64 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn contains_eps(&self, p: Vertex, eps: f64) -> bool {
        p.x >= self.min_x - eps
            && p.x <= self.max_x + eps
            && p.y >= self.min_y - eps
            && p.y <= self.max_y + eps
    }

    /// Translation that moves the box `[lo, hi]` inside the bounds.
    ///
    /// A box wider than the bounds is aligned with the max edge (the max check
    /// wins), matching how the display layer refits a shape.
    pub fn shift_into(&self, lo: Vertex, hi: Vertex) -> Vertex {
        let mut shift = Vertex::zeros();
        if lo.x < self.min_x {
            shift.x = self.min_x - lo.x;
        }
        if hi.x > self.max_x {
            shift.x = self.max_x - hi.x;
        }
        if lo.y < self.min_y {
            shift.y = self.min_y - lo.y;
        }
        if hi.y > self.max_y {
            shift.y = self.max_y - hi.y;
        }
        shift
    }

    /// How much the box `[lo, hi]` is larger than the bounds, summed over
    /// both axes. Zero when some translation fits it.
    pub fn overflow(&self, lo: Vertex, hi: Vertex) -> f64 {
        (hi.x - lo.x - self.span_x()).max(0.0) + (hi.y - lo.y - self.span_y()).max(0.0)
    }

    /// Total distance by which the box `[lo, hi]` sticks out past the edges.
    pub fn excess(&self, lo: Vertex, hi: Vertex) -> f64 {
        (self.min_x - lo.x).max(0.0)
            + (hi.x - self.max_x).max(0.0)
            + (self.min_y - lo.y).max(0.0)
            + (hi.y - self.max_y).max(0.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_viewport(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1, DEFAULT_PADDING)
    }
}

/// Editor configuration (bounds on angles and lengths, tolerances).
#[derive(Clone, Copy, Debug)]
pub struct EditorCfg {
    /// Inclusive range for every rounded interior angle, in degrees.
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
    /// Length floor for AB/AD adjustments on parallelograms and rhombi.
    pub min_side: f64,
    /// Trapezium parallel sides: `max(floor, frac · min(width, height))`.
    pub trapezium_min_frac: f64,
    pub trapezium_min_floor: f64,
    /// Crossing epsilon: `max(floor, 2 · min(width, height) / base)`.
    pub crossing_eps_base: f64,
    pub crossing_eps_floor: f64,
    /// Length change per button press.
    pub length_step: f64,
    /// Half-width of the invisible drag stroke around each side.
    pub hit_half_width: f64,
    /// Iterations when searching the largest admissible length.
    pub bisect_iters: usize,
    pub eps_contain: f64,
    pub padding: f64,
}

impl Default for EditorCfg {
    fn default() -> Self {
        Self {
            min_angle_deg: 30.0,
            max_angle_deg: 150.0,
            min_side: 50.0,
            trapezium_min_frac: 0.05,
            trapezium_min_floor: 20.0,
            crossing_eps_base: 600.0,
            crossing_eps_floor: 1.0,
            length_step: 20.0,
            hit_half_width: 10.0,
            bisect_iters: 48,
            eps_contain: 1e-9,
            padding: DEFAULT_PADDING,
        }
    }
}

impl EditorCfg {
    /// Compares an already rounded angle; NaN never passes.
    #[inline]
    pub fn angle_ok(&self, deg: f64) -> bool {
        deg >= self.min_angle_deg && deg <= self.max_angle_deg
    }

    #[inline]
    pub fn trapezium_min_len(&self, b: &Bounds) -> f64 {
        self.trapezium_min_floor
            .max(self.trapezium_min_frac * b.min_dim())
    }

    #[inline]
    pub fn crossing_eps(&self, b: &Bounds) -> f64 {
        self.crossing_eps_floor
            .max(2.0 * b.min_dim() / self.crossing_eps_base)
    }
}
