//! Scene description for the display layer, built from `Quad` queries only.
//!
//! `render` produces plain data (polygon, side lines, direction arrows, angle
//! arcs, labels, adjacent-angle equations); `Scene` implements `Display` as
//! an SVG document so headless callers can write it straight to a file.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector2;

use crate::geom::{Bounds, Side, Vertex};
use crate::model::{Quad, ShapeVariant};

pub const BLUE: &str = "#1976d2";
pub const RED: &str = "#d32f2f";
const FILL: &str = "#e3f2fd";
const ARC: &str = "#666";
const TEXT: &str = "#333";
const ANGLE_ARC_RADIUS: f64 = 25.0;
const VERTEX_NAMES: [&str; 4] = ["A", "B", "C", "D"];
const VERTEX_LABEL_OFFSETS: [(f64, f64); 4] = [(-25.0, -10.0), (15.0, -10.0), (15.0, 25.0), (-25.0, 25.0)];

#[derive(Clone, Debug, PartialEq)]
pub struct SideLine {
    pub side: Side,
    pub from: Vertex,
    pub to: Vertex,
    pub color: &'static str,
    pub draggable: bool,
    pub anchored: bool,
}

/// Filled triangle marking a side's direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub side: Side,
    pub tip: Vertex,
    pub left: Vertex,
    pub right: Vertex,
}

/// Interior-angle arc at `vertex`, drawn clockwise from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleArc {
    pub vertex: usize,
    pub radius: f64,
    pub from: Vertex,
    pub to: Vertex,
    pub large_arc: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Vertex,
    pub color: &'static str,
    pub font_size: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub polygon: [Vertex; 4],
    pub sides: Vec<SideLine>,
    pub arrows: Vec<Arrow>,
    pub arcs: Vec<AngleArc>,
    pub labels: Vec<Label>,
    pub equations: [String; 4],
}

/// Sides carrying a direction arrow, with `-1` flipping the arrow against the
/// side's A→B→C→D orientation (so AB/CD and DA/BC point the same way).
pub fn arrow_sides(variant: ShapeVariant) -> &'static [(Side, f64)] {
    match variant {
        ShapeVariant::Trapezium => &[(Side::Ab, 1.0), (Side::Cd, -1.0)],
        ShapeVariant::Parallelogram | ShapeVariant::Rhombus => &[
            (Side::Ab, 1.0),
            (Side::Cd, -1.0),
            (Side::Da, -1.0),
            (Side::Bc, 1.0),
        ],
    }
}

pub fn render(quad: &Quad, bounds: &Bounds, anchored: Option<Side>) -> Scene {
    let v = *quad.vertices();
    let angles = quad.angles();

    let sides = Side::ALL
        .into_iter()
        .map(|side| {
            let (i, j) = side.endpoints();
            SideLine {
                side,
                from: v[i],
                to: v[j],
                color: match side {
                    Side::Ab | Side::Cd => BLUE,
                    Side::Bc | Side::Da => RED,
                },
                draggable: quad.variant().is_draggable(side),
                anchored: anchored == Some(side),
            }
        })
        .collect();

    let arrow_len = 12f64.max(0.03 * bounds.width.min(bounds.height));
    let arrows = arrow_sides(quad.variant())
        .iter()
        .map(|&(side, dm)| {
            let (i, j) = side.endpoints();
            let mid = (v[i] + v[j]) * 0.5;
            let d = v[j] - v[i];
            let mag = d.norm();
            let u = if mag > 0.0 { d / mag } else { d };
            let n = Vector2::new(-u.y, u.x);
            let half = u * (arrow_len / 2.0) * dm;
            let base = mid - half;
            Arrow {
                side,
                tip: mid + half,
                left: base + n * (arrow_len / 4.0),
                right: base - n * (arrow_len / 4.0),
            }
        })
        .collect();

    let arcs = (0..4)
        .map(|i| {
            let p = v[i];
            let prev = v[(i + 3) % 4] - p;
            let next = v[(i + 1) % 4] - p;
            let a1 = prev.y.atan2(prev.x);
            let a2 = next.y.atan2(next.x);
            let mut diff = a2 - a1;
            if diff > PI {
                diff -= 2.0 * PI;
            } else if diff < -PI {
                diff += 2.0 * PI;
            }
            let (start, end) = if diff > 0.0 { (a1, a2) } else { (a2, a1) };
            let on_arc = |t: f64| p + Vector2::new(t.cos(), t.sin()) * ANGLE_ARC_RADIUS;
            AngleArc {
                vertex: i,
                radius: ANGLE_ARC_RADIUS,
                from: on_arc(start),
                to: on_arc(end),
                large_arc: diff.abs() > PI,
            }
        })
        .collect();

    let mut labels = Vec::with_capacity(8);
    for i in 0..4 {
        let p = v[i];
        let (ox, oy) = VERTEX_LABEL_OFFSETS[i];
        labels.push(Label {
            text: VERTEX_NAMES[i].to_string(),
            at: p + Vector2::new(ox, oy),
            color: if i % 2 == 0 { BLUE } else { RED },
            font_size: "1.4rem",
        });
        let toward = (v[(i + 1) % 4] + v[(i + 3) % 4]) * 0.5 - p;
        labels.push(Label {
            text: format!("{}°", angles[i]),
            at: p + toward * 0.4,
            color: TEXT,
            font_size: "0.9rem",
        });
    }

    Scene {
        width: bounds.width,
        height: bounds.height,
        polygon: v,
        sides,
        arrows,
        arcs,
        labels,
        equations: equations(&angles),
    }
}

/// Adjacent-angle sums, e.g. `∠BAD + ∠ABC = 66° + 114° = 180°`.
pub fn equations(angles: &[f64; 4]) -> [String; 4] {
    const NAMES: [&str; 4] = ["∠BAD", "∠ABC", "∠BCD", "∠CDA"];
    std::array::from_fn(|i| {
        let j = (i + 1) % 4;
        format!(
            "{} + {} = {}° + {}° = {}°",
            NAMES[i],
            NAMES[j],
            angles[i],
            angles[j],
            angles[i] + angles[j]
        )
    })
}

fn points(ps: &[Vertex]) -> String {
    ps.iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(
            f,
            r#"  <polygon points="{}" fill="{FILL}" stroke="{BLUE}" stroke-width="3"/>"#,
            points(&self.polygon)
        )?;
        for s in &self.sides {
            let class = if s.anchored { r#" class="anchored""# } else { "" };
            writeln!(
                f,
                r#"  <line id="side-{}"{class} x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="3"/>"#,
                s.side.index(),
                s.from.x,
                s.from.y,
                s.to.x,
                s.to.y,
                s.color
            )?;
        }
        for a in &self.arrows {
            writeln!(
                f,
                r#"  <polygon id="arrow-side-{}" class="parallel-arrow" points="{}"/>"#,
                a.side.index(),
                points(&[a.tip, a.left, a.right])
            )?;
        }
        for a in &self.arcs {
            writeln!(
                f,
                r#"  <path d="M {} {} A {r} {r} 0 {} 1 {} {}" stroke="{ARC}" stroke-width="2" fill="none"/>"#,
                a.from.x,
                a.from.y,
                u8::from(a.large_arc),
                a.to.x,
                a.to.y,
                r = a.radius
            )?;
        }
        for l in &self.labels {
            writeln!(
                f,
                r#"  <text x="{}" y="{}" fill="{}" font-size="{}">{}</text>"#,
                l.at.x, l.at.y, l.color, l.font_size, l.text
            )?;
        }
        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trapezium_has_two_arrows_and_drag_handles() {
        let q = Quad::new(ShapeVariant::Trapezium);
        let scene = render(&q, &Bounds::default(), Some(Side::Cd));
        assert_eq!(scene.arrows.len(), 2);
        let draggable: Vec<_> = scene
            .sides
            .iter()
            .filter(|s| s.draggable)
            .map(|s| s.side)
            .collect();
        assert_eq!(draggable, vec![Side::Ab, Side::Cd]);
        assert!(scene.sides[2].anchored && !scene.sides[0].anchored);
    }

    #[test]
    fn arrows_point_the_same_way_on_opposite_sides() {
        let q = Quad::new(ShapeVariant::Parallelogram);
        let scene = render(&q, &Bounds::default(), None);
        assert_eq!(scene.arrows.len(), 4);
        let dir = |a: &Arrow| (a.tip - (a.left + a.right) * 0.5).normalize();
        let ab = scene.arrows.iter().find(|a| a.side == Side::Ab).unwrap();
        let cd = scene.arrows.iter().find(|a| a.side == Side::Cd).unwrap();
        assert_relative_eq!(dir(ab), dir(cd), epsilon = 1e-12);
        // 3% of min(700, 500) = 15
        assert_relative_eq!((ab.tip - (ab.left + ab.right) * 0.5).norm(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn arcs_sit_on_the_radius() {
        let q = Quad::new(ShapeVariant::Rhombus);
        let scene = render(&q, &Bounds::default(), None);
        for a in &scene.arcs {
            let p = q.vertex(a.vertex);
            assert_relative_eq!((a.from - p).norm(), ANGLE_ARC_RADIUS, epsilon = 1e-9);
            assert_relative_eq!((a.to - p).norm(), ANGLE_ARC_RADIUS, epsilon = 1e-9);
            assert!(!a.large_arc);
        }
    }

    #[test]
    fn equations_and_labels_use_rounded_angles() {
        let q = Quad::new(ShapeVariant::Parallelogram);
        let scene = render(&q, &Bounds::default(), None);
        assert_eq!(scene.equations[0], "∠BAD + ∠ABC = 66° + 114° = 180°");
        assert_eq!(scene.equations[3], "∠CDA + ∠BAD = 114° + 66° = 180°");
        let texts: Vec<_> = scene.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["A", "66°", "B", "114°", "C", "66°", "D", "114°"]);
    }

    #[test]
    fn svg_contains_every_element() {
        let q = Quad::new(ShapeVariant::Parallelogram);
        let svg = render(&q, &Bounds::default(), None).to_string();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line ").count(), 4);
        assert_eq!(svg.matches("parallel-arrow").count(), 4);
        assert_eq!(svg.matches("<path ").count(), 4);
        assert_eq!(svg.matches("<text ").count(), 8);
        assert!(svg.contains(r#"points="150,120 400,120 480,300 230,300""#));
    }
}
