use super::*;
use nalgebra::vector;

#[test]
fn angle_at_right_and_degenerate() {
    let p = vector![0.0, 0.0];
    let a = angle_at(p, vector![3.0, 0.0], vector![0.0, 5.0]);
    assert!((a - 90.0).abs() < 1e-12);
    let b = angle_at(p, vector![1.0, 0.0], vector![-1.0, 1.0]);
    assert!((b - 135.0).abs() < 1e-9);
    // coinciding neighbour -> undefined
    assert!(angle_at(p, p, vector![1.0, 0.0]).is_nan());
}

#[test]
fn project_to_circle_keeps_direction() {
    let c = vector![10.0, 10.0];
    let q = project_to_circle(vector![13.0, 14.0], c, 10.0);
    assert!(((q - c).norm() - 10.0).abs() < 1e-12);
    assert!((q - vector![16.0, 18.0]).norm() < 1e-12);
    // center itself lands on +x
    let z = project_to_circle(c, c, 2.0);
    assert_eq!(z, vector![12.0, 10.0]);
}

#[test]
fn clamp_range_prefers_lower_bound_when_empty() {
    assert_eq!(clamp_range(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_range(-5.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_range(50.0, 0.0, 10.0), 10.0);
    assert_eq!(clamp_range(3.0, 8.0, 2.0), 8.0);
}

#[test]
fn bounds_from_viewport_floors_and_falls_back() {
    let b = Bounds::from_viewport(700.0, 500.0, DEFAULT_PADDING);
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (40.0, 660.0, 40.0, 460.0));
    assert_eq!(b, Bounds::default());

    let tiny = Bounds::from_viewport(50.0, 120.0, 40.0);
    assert_eq!((tiny.width, tiny.height), (200.0, 200.0));
    assert_eq!(tiny.max_x, 160.0);

    let missing = Bounds::from_viewport(0.0, f64::NAN, 40.0);
    assert_eq!((missing.width, missing.height), DEFAULT_VIEWPORT);

    let huge_pad = Bounds::from_viewport(200.0, 200.0, 150.0);
    assert_eq!(huge_pad.max_x, 160.0);
    assert!(huge_pad.span_x() >= 10.0);
}

#[test]
fn shift_into_moves_box_inside() {
    let b = Bounds::default();
    let s = b.shift_into(vector![20.0, 100.0], vector![200.0, 480.0]);
    assert_eq!(s, vector![20.0, -20.0]);
    let none = b.shift_into(vector![100.0, 100.0], vector![200.0, 200.0]);
    assert_eq!(none, vector![0.0, 0.0]);
}

#[test]
fn overflow_and_excess_measure_different_things() {
    // 200x200 viewport: [40, 160]²
    let b = Bounds::from_viewport(200.0, 200.0, 40.0);
    // 330 wide, 180 tall box placed at the default parallelogram's position
    let (lo, hi) = (vector![150.0, 120.0], vector![480.0, 300.0]);
    assert!((b.overflow(lo, hi) - (210.0 + 60.0)).abs() < 1e-12);
    assert!((b.excess(lo, hi) - (320.0 + 140.0)).abs() < 1e-12);
    // a small box outside the bounds overflows nothing but still sticks out
    let (lo, hi) = (vector![0.0, 50.0], vector![10.0, 60.0]);
    assert_eq!(b.overflow(lo, hi), 0.0);
    assert_eq!(b.excess(lo, hi), 40.0);
}

#[test]
fn side_indices_and_opposites() {
    for (i, s) in Side::ALL.iter().enumerate() {
        assert_eq!(s.index(), i);
        assert_eq!(Side::from_index(i), Some(*s));
        assert_eq!(s.opposite().opposite(), *s);
    }
    assert_eq!(Side::Da.endpoints(), (3, 0));
    assert_eq!(Side::Ab.opposite(), Side::Cd);
    assert_eq!(Side::from_index(4), None);
}

#[test]
fn cfg_scales_with_viewport() {
    let cfg = EditorCfg::default();
    let b = Bounds::default();
    assert!((cfg.trapezium_min_len(&b) - 25.0).abs() < 1e-12);
    assert!((cfg.crossing_eps(&b) - 1.0 / 0.6).abs() < 1e-12);
    let small = Bounds::from_viewport(200.0, 200.0, 40.0);
    assert_eq!(cfg.trapezium_min_len(&small), 20.0);
    assert_eq!(cfg.crossing_eps(&small), 1.0);
    assert!(cfg.angle_ok(30.0) && cfg.angle_ok(150.0));
    assert!(!cfg.angle_ok(29.0) && !cfg.angle_ok(151.0) && !cfg.angle_ok(f64::NAN));
}

#[test]
fn signs_and_cross() {
    assert_eq!(signum_or(2.0, 1.0), 1.0);
    assert_eq!(signum_or(-0.1, 1.0), -1.0);
    assert_eq!(signum_or(0.0, 1.0), 1.0);
    assert_eq!(cross(vector![1.0, 0.0], vector![0.0, 1.0]), 1.0);
    assert_eq!(perp(vector![1.0, 0.0]), vector![0.0, 1.0]);
}
