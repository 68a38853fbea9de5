//! Angles on a straight line: three congruent triangles built from two chosen
//! angles, each of which can be moved and rotated so the angles a, b, c can be
//! lined up along one line.
//!
//! Purpose
//! - Build a triangle with prescribed angles (law of sines, side `a` as the
//!   horizontal base, centred on its centroid) and place three copies of it.
//! - Route pointer gestures to a copy: grabbing the polygon moves it, grabbing
//!   its handle rotates it about its centre.

use nalgebra::{Rotation2, Vector2};
use rand::Rng;

use crate::geom::{cross, Vertex};

/// Base length of the built triangle (side opposite angle a).
pub const TILE_SIZE: f64 = 144.0;
/// Initial centres of the three copies.
pub const TILE_CENTERS: [(f64, f64); 3] = [(200.0, 200.0), (400.0, 200.0), (600.0, 200.0)];
pub const HANDLE_RADIUS: f64 = 12.0;
/// Handle sits this far above the first vertex, in the triangle's frame.
const HANDLE_LIFT: f64 = 30.0;

/// `180 − a1 − a2`, or 0 when the two angles leave nothing for a triangle.
pub fn third_angle(a1: f64, a2: f64) -> f64 {
    let a3 = 180.0 - a1 - a2;
    if a3 > 0.0 {
        a3
    } else {
        0.0
    }
}

/// Whole-degree angles with `a1 ∈ [1, 177]`, `a2 ∈ [1, 179 − a1]`; the third
/// is therefore at least 1.
pub fn random_angles<R: Rng>(rng: &mut R) -> [f64; 3] {
    let a1 = rng.gen_range(1..=177u32);
    let a2 = rng.gen_range(1..=179 - a1);
    let (a1, a2) = (f64::from(a1), f64::from(a2));
    [a1, a2, third_angle(a1, a2)]
}

/// Vertices A, B, C carrying angles `a`, `b`, `c` (degrees), with BC of
/// length `size` along +x and the centroid at the origin.
pub fn triangle_points(a: f64, b: f64, c: f64, size: f64) -> [Vertex; 3] {
    let (ra, rb, rc) = (a.to_radians(), b.to_radians(), c.to_radians());
    let side_c = size * rc.sin() / ra.sin();
    let pa = Vector2::new(side_c * rb.cos(), side_c * rb.sin());
    let pb = Vector2::zeros();
    let pc = Vector2::new(size, 0.0);
    let centroid = (pa + pb + pc) / 3.0;
    [pa - centroid, pb - centroid, pc - centroid]
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Grab {
    /// Pointer offset from the centre at pointer-down.
    Move { offset: Vertex },
    /// Pointer bearing and tile rotation at pointer-down (radians, degrees).
    Rotate { bearing: f64, rotation: f64 },
}

/// One placed copy of the triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub center: Vertex,
    /// Degrees, positive turning +x toward +y.
    pub rotation: f64,
}

impl Tile {
    #[inline]
    fn to_world(&self, local: Vertex) -> Vertex {
        self.center + Rotation2::new(self.rotation.to_radians()) * local
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AngleLine {
    angles: [f64; 3],
    local: [Vertex; 3],
    tiles: [Tile; 3],
    grab: Option<(usize, Grab)>,
}

impl AngleLine {
    /// Three copies of the triangle with angles `a1`, `a2` and their
    /// complement; `None` when no triangle exists.
    pub fn new(a1: f64, a2: f64) -> Option<Self> {
        let a3 = third_angle(a1, a2);
        if a3 <= 0.0 || a1 <= 0.0 || a2 <= 0.0 {
            return None;
        }
        Some(Self::placed([a1, a2, a3]))
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::placed(random_angles(rng))
    }

    fn placed(angles: [f64; 3]) -> Self {
        let [a, b, c] = angles;
        Self {
            angles,
            local: triangle_points(a, b, c, TILE_SIZE),
            tiles: TILE_CENTERS.map(|(x, y)| Tile {
                center: Vector2::new(x, y),
                rotation: 0.0,
            }),
            grab: None,
        }
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn tiles(&self) -> &[Tile; 3] {
        &self.tiles
    }

    /// Vertices of copy `i` in canvas coordinates.
    pub fn world_points(&self, i: usize) -> Option<[Vertex; 3]> {
        let tile = self.tiles.get(i)?;
        Some(self.local.map(|p| tile.to_world(p)))
    }

    /// Rotation handle of copy `i` in canvas coordinates.
    pub fn handle(&self, i: usize) -> Option<Vertex> {
        let tile = self.tiles.get(i)?;
        let [pa, pb, _] = self.local;
        let local = Vector2::new(pa.x + (pb.x - pa.x) * 0.5, pa.y - HANDLE_LIFT);
        Some(tile.to_world(local))
    }

    /// Grab a handle (rotate) or a triangle (move); later copies are on top.
    /// Returns whether anything was grabbed.
    pub fn pointer_down(&mut self, p: Vertex) -> bool {
        let hit_handle = (0..3)
            .rev()
            .find(|&i| self.handle(i).is_some_and(|h| (h - p).norm() <= HANDLE_RADIUS));
        if let Some(i) = hit_handle {
            let d = p - self.tiles[i].center;
            self.grab = Some((
                i,
                Grab::Rotate {
                    bearing: d.y.atan2(d.x),
                    rotation: self.tiles[i].rotation,
                },
            ));
            return true;
        }
        let hit_body = (0..3)
            .rev()
            .find(|&i| self.world_points(i).is_some_and(|t| inside(&t, p)));
        if let Some(i) = hit_body {
            self.grab = Some((
                i,
                Grab::Move {
                    offset: p - self.tiles[i].center,
                },
            ));
            return true;
        }
        false
    }

    pub fn pointer_move(&mut self, p: Vertex) {
        let Some((i, grab)) = self.grab else {
            return;
        };
        let tile = &mut self.tiles[i];
        match grab {
            Grab::Move { offset } => tile.center = p - offset,
            Grab::Rotate { bearing, rotation } => {
                let d = p - tile.center;
                tile.rotation = rotation + (d.y.atan2(d.x) - bearing).to_degrees();
            }
        }
    }

    /// Pointer-up or leave.
    pub fn pointer_up(&mut self) {
        self.grab = None;
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }
}

fn inside(t: &[Vertex; 3], p: Vertex) -> bool {
    let s = [
        cross(t[1] - t[0], p - t[0]),
        cross(t[2] - t[1], p - t[1]),
        cross(t[0] - t[2], p - t[2]),
    ];
    s.iter().all(|v| *v >= 0.0) || s.iter().all(|v| *v <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::angle_at;
    use approx::assert_relative_eq;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn third_angle_never_goes_negative() {
        assert_eq!(third_angle(60.0, 70.0), 50.0);
        assert_eq!(third_angle(100.0, 80.0), 0.0);
        assert_eq!(third_angle(120.0, 90.0), 0.0);
        assert!(AngleLine::new(100.0, 80.0).is_none());
    }

    #[test]
    fn built_triangle_has_the_requested_angles() {
        let [pa, pb, pc] = triangle_points(50.0, 60.0, 70.0, TILE_SIZE);
        assert_relative_eq!(angle_at(pa, pb, pc), 50.0, epsilon = 1e-9);
        assert_relative_eq!(angle_at(pb, pc, pa), 60.0, epsilon = 1e-9);
        assert_relative_eq!(angle_at(pc, pa, pb), 70.0, epsilon = 1e-9);
        // base BC horizontal with the requested length, centroid at origin
        assert_relative_eq!(pb.y, pc.y, epsilon = 1e-12);
        assert_relative_eq!((pc - pb).norm(), TILE_SIZE, epsilon = 1e-9);
        assert_relative_eq!((pa + pb + pc).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn seeded_angles_are_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let [a1, a2, a3] = random_angles(&mut rng);
            assert!((1.0..=177.0).contains(&a1));
            assert!(a2 >= 1.0 && a2 <= 179.0 - a1);
            assert!(a3 >= 1.0);
            assert_eq!(a1 + a2 + a3, 180.0);
            assert_eq!(a1.fract(), 0.0);
        }
        let a = AngleLine::random(&mut StdRng::seed_from_u64(3));
        let b = AngleLine::random(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn grabbing_the_body_moves_a_copy() {
        let mut line = AngleLine::new(60.0, 60.0).unwrap();
        // centroid of copy 1 is its centre
        assert!(line.pointer_down(vector![400.0, 200.0]));
        line.pointer_move(vector![430.0, 260.0]);
        line.pointer_up();
        assert_eq!(line.tiles()[1].center, vector![430.0, 260.0]);
        assert_eq!(line.tiles()[0].center, vector![200.0, 200.0]);
        assert!(!line.is_grabbing());
        // empty canvas grabs nothing
        assert!(!line.pointer_down(vector![300.0, 450.0]));
    }

    #[test]
    fn grabbing_the_handle_rotates_about_the_centre() {
        let mut line = AngleLine::new(50.0, 60.0).unwrap();
        let c = line.tiles()[0].center;
        let h = line.handle(0).unwrap();
        let before = line.world_points(0).unwrap();
        assert!(line.pointer_down(h));
        let quarter = Rotation2::new(std::f64::consts::FRAC_PI_2);
        line.pointer_move(c + quarter * (h - c));
        // bearings wrap, so only the angle mod 360 is fixed
        assert_relative_eq!(line.tiles()[0].rotation.rem_euclid(360.0), 90.0, epsilon = 1e-9);
        assert_eq!(line.tiles()[0].center, c);
        let after = line.world_points(0).unwrap();
        for (p, q) in before.iter().zip(after.iter()) {
            assert_relative_eq!(q - c, quarter * (p - c), epsilon = 1e-9);
        }
    }
}
