use mockupkit_designer::{Point, Viewport};

#[test]
fn test_screen_canvas_roundtrip() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(2.0);
    viewport.pan_by(15.0, -30.0);

    let canvas = Point::new(123.0, 456.0);
    let back = viewport.screen_to_canvas(viewport.canvas_to_screen(canvas));
    assert!((back.x - canvas.x).abs() < 1e-9);
    assert!((back.y - canvas.y).abs() < 1e-9);
}

#[test]
fn test_wheel_zoom_keeps_cursor_anchor() {
    let mut viewport = Viewport::new(800.0, 600.0);
    let cursor = Point::new(200.0, 150.0);
    let before = viewport.screen_to_canvas(cursor);
    viewport.zoom_by_wheel(-300.0, cursor);

    assert!(viewport.zoom() > 1.0);
    let after = viewport.screen_to_canvas(cursor);
    assert!((after.x - before.x).abs() < 1e-9);
    assert!((after.y - before.y).abs() < 1e-9);
}

#[test]
fn test_presets_step() {
    let mut viewport = Viewport::new(800.0, 600.0);
    assert!(viewport.zoom_in());
    assert_eq!(viewport.zoom_percent(), 125);
    assert!(viewport.zoom_in());
    assert!(!viewport.zoom_in());
    assert_eq!(viewport.zoom_percent(), 145);

    viewport.set_zoom_percent(100);
    assert!(viewport.zoom_out());
    assert_eq!(viewport.zoom_percent(), 50);
}

#[test]
fn test_invalid_zoom_is_ignored() {
    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.set_zoom(f64::NAN);
    viewport.set_zoom(-1.0);
    assert_eq!(viewport.zoom(), 1.0);
    viewport.set_zoom(1000.0);
    assert_eq!(viewport.zoom(), 20.0);
}
