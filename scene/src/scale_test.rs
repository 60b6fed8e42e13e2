#![allow(clippy::float_cmp)]

use super::*;

const EPS: f64 = 1e-9;

fn canvas() -> CanvasSize {
    CanvasSize::default()
}

// =============================================================
// fit
// =============================================================

#[test]
fn fit_scale_landscape_maps_width_to_cap() {
    let scale = fit_scale(800.0, 600.0, 400.0).unwrap();
    assert!((scale - 0.5).abs() < EPS);
}

#[test]
fn fit_scale_portrait_maps_height_to_cap() {
    let scale = fit_scale(300.0, 1200.0, 400.0).unwrap();
    assert!((1200.0 * scale - 400.0).abs() < EPS);
    assert!(300.0 * scale < 400.0);
}

#[test]
fn fit_scale_square_uses_height_branch() {
    let scale = fit_scale(500.0, 500.0, 400.0).unwrap();
    assert!((scale - 0.8).abs() < EPS);
}

#[test]
fn fit_scale_upscales_small_images() {
    let scale = fit_scale(100.0, 50.0, 400.0).unwrap();
    assert!((scale - 4.0).abs() < EPS);
}

#[test]
fn fit_placement_larger_side_equals_cap_and_is_centered() {
    for (w, h) in [(640.0, 480.0), (480.0, 640.0), (1920.0, 1080.0), (37.0, 91.0)] {
        let p = fit_placement(w, h, 400.0, canvas()).unwrap();
        assert!((p.width.max(p.height) - 400.0).abs() < EPS, "{w}x{h}");
        assert!((p.x - (1000.0 - p.width) / 2.0).abs() < EPS);
        assert!((p.y - (1500.0 - p.height) / 2.0).abs() < EPS);
    }
}

// =============================================================
// cover
// =============================================================

#[test]
fn cover_scale_is_max_of_axis_ratios() {
    let scale = cover_scale(2000.0, 1000.0, canvas()).unwrap();
    assert!((scale - 1.5).abs() < EPS);

    let scale = cover_scale(500.0, 3000.0, canvas()).unwrap();
    assert!((scale - 2.0).abs() < EPS);
}

#[test]
fn cover_placement_contains_the_canvas() {
    for (w, h) in [(2000.0, 1000.0), (500.0, 3000.0), (1000.0, 1500.0), (333.0, 777.0)] {
        let p = cover_placement(w, h, canvas()).unwrap();
        let expected = (1000.0 / w).max(1500.0 / h);
        assert!((p.scale - expected).abs() < EPS);
        assert!(p.x <= EPS && p.y <= EPS, "{w}x{h} starts inside the canvas");
        assert!(p.x + p.width >= 1000.0 - EPS);
        assert!(p.y + p.height >= 1500.0 - EPS);
    }
}

#[test]
fn cover_placement_exact_fit_is_identity() {
    let p = cover_placement(1000.0, 1500.0, canvas()).unwrap();
    assert!((p.scale - 1.0).abs() < EPS);
    assert!(p.x.abs() < EPS);
    assert!(p.y.abs() < EPS);
}

// =============================================================
// degenerate input
// =============================================================

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        fit_scale(0.0, 100.0, 400.0),
        Err(ScaleError::Degenerate { width: 0.0, height: 100.0 })
    );
    assert!(cover_scale(100.0, 0.0, canvas()).is_err());
}

#[test]
fn non_finite_dimensions_are_rejected() {
    assert!(fit_scale(f64::NAN, 100.0, 400.0).is_err());
    assert!(cover_scale(f64::INFINITY, 100.0, canvas()).is_err());
}

#[test]
fn centered_box_larger_than_canvas_has_negative_origin() {
    let at = centered(1200.0, 1800.0, canvas());
    assert_eq!(at, Point::new(-100.0, -150.0));
}
