#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
    assert!(approx_eq(Point::new(1.0, 1.0).distance(Point::new(1.0, 1.0)), 0.0));
}

#[test]
fn point_serializes_as_xy() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap_or_default();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(40.0, 80.0));
    assert!(point_approx_eq(world, Point::new(20.0, 40.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 50.0, pan_y: 30.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(0.0, 0.0));
    assert!(point_approx_eq(world, Point::new(-25.0, -15.0)));
}

// --- world_to_screen ---

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

// --- Round trips ---

#[test]
fn round_trip_screen_first_over_grid() {
    let cameras = [
        Camera::default(),
        Camera { pan_x: 10.0, pan_y: 20.0, zoom: 1.5 },
        Camera { pan_x: -300.0, pan_y: 42.5, zoom: 0.5 },
        Camera { pan_x: 13.7, pan_y: -42.3, zoom: 3.0 },
        Camera { pan_x: 0.1, pan_y: 0.2, zoom: 0.75 },
    ];
    let points = [
        Point::new(0.0, 0.0),
        Point::new(400.0, 300.0),
        Point::new(-12.5, 999.9),
        Point::new(1e4, -1e4),
    ];
    for cam in cameras {
        for p in points {
            let back = cam.world_to_screen(cam.screen_to_world(p));
            assert!(point_approx_eq(p, back), "{cam:?} {p:?} -> {back:?}");
        }
    }
}

#[test]
fn round_trip_world_first() {
    let cam = Camera { pan_x: 50.0, pan_y: -30.0, zoom: 2.0 };
    let world = Point::new(100.0, 200.0);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

// --- screen_dist_to_world ---

#[test]
fn screen_dist_to_world_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 0.5 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 16.0));
}

// --- pan_by ---

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.5, 2.5);
    assert!(approx_eq(cam.pan_x, 12.5));
    assert!(approx_eq(cam.pan_y, -2.5));
    assert_eq!(cam.zoom, 1.0);
}

// --- Zoom clamping ---

#[test]
fn clamp_zoom_bounds() {
    assert_eq!(clamp_zoom(0.1), ZOOM_MIN);
    assert_eq!(clamp_zoom(10.0), ZOOM_MAX);
    assert_eq!(clamp_zoom(1.7), 1.7);
}

#[test]
fn set_zoom_clamps_and_reports_change() {
    let mut cam = Camera::default();
    assert!(cam.set_zoom(5.0));
    assert_eq!(cam.zoom, ZOOM_MAX);
    assert!(!cam.set_zoom(4.0));
    assert_eq!(cam.zoom, ZOOM_MAX);
}

#[test]
fn set_zoom_ignores_nan() {
    let mut cam = Camera::default();
    assert!(!cam.set_zoom(f64::NAN));
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn set_zoom_infinity_clamps() {
    let mut cam = Camera::default();
    cam.set_zoom(f64::INFINITY);
    assert_eq!(cam.zoom, ZOOM_MAX);
    cam.set_zoom(f64::NEG_INFINITY);
    assert_eq!(cam.zoom, ZOOM_MIN);
}

#[test]
fn scale_zoom_sequence_stays_in_range() {
    let mut cam = Camera::default();
    let factors = [1.1, 1.1, 7.0, 0.2, 0.9, 0.01, 1.1, 100.0, 0.5, 0.999, 1.3];
    for f in factors {
        cam.scale_zoom(f);
        assert!((ZOOM_MIN..=ZOOM_MAX).contains(&cam.zoom), "zoom {} out of range", cam.zoom);
    }
}

#[test]
fn zoom_buttons_step_and_clamp() {
    let mut cam = Camera::default();
    assert!(cam.zoom_in());
    assert!(approx_eq(cam.zoom, 1.1));
    assert!(cam.zoom_out());
    assert!(approx_eq(cam.zoom, 1.0));

    for _ in 0..40 {
        cam.zoom_in();
    }
    assert_eq!(cam.zoom, ZOOM_MAX);
    assert!(!cam.zoom_in());

    for _ in 0..40 {
        cam.zoom_out();
    }
    assert_eq!(cam.zoom, ZOOM_MIN);
    assert!(!cam.zoom_out());
}
