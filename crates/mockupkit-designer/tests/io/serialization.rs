use mockupkit_core::{ObjectKind, PrintDimensions};
use mockupkit_designer::{
    restore_snapshot, serialize_scene, BackgroundContent, IdentityParams, ImageContent,
    ObjectContent, Scene, SceneSnapshot, TextContent, Transform2D, VectorContent,
};

const EPS: f64 = 1e-6;

fn populated_scene() -> Scene {
    let mut scene = Scene::new(800.0, 600.0);
    scene.set_background(
        BackgroundContent {
            source_ref: "/mockups/hoodies/front.png".into(),
            natural_width: 1000.0,
            natural_height: 1000.0,
        },
        Transform2D::at(400.0, 300.0).with_scale(0.48, 0.48),
    );
    scene.ensure_print_guide(&PrintDimensions::new(150.0, 120.0).with_offset(0.0, -40.0));

    let mut text = TextContent::new("Front text");
    text.font_weight = 700;
    scene.add(
        ObjectContent::Text(text),
        Transform2D::at(401.25, 258.5).with_rotation(12.5),
    );
    scene.add(
        ObjectContent::Image(ImageContent::new("upload.png", 600.0, 300.0)),
        Transform2D::at(390.0, 270.0).with_scale(0.25, 0.25),
    );
    scene.add(
        ObjectContent::VectorGraphic(VectorContent::from_path_data("M0 0 L10 0 L10 10 Z")),
        Transform2D::at(410.0, 250.0).with_scale(1.5, -1.5).with_rotation(-90.0),
    );
    scene
}

#[test]
fn test_snapshot_excludes_system_objects() {
    let scene = populated_scene();
    let snapshot = serialize_scene(&scene, &IdentityParams::default());

    assert_eq!(scene.len(), 5);
    assert_eq!(snapshot.len(), 3);
    assert!(snapshot.objects.iter().all(|o| o.editable));
    assert_eq!(snapshot.source_width, Some(800.0));
    assert_eq!(snapshot.source_height, Some(600.0));
}

#[test]
fn test_roundtrip_preserves_geometry() {
    let identity = IdentityParams::default();
    let original = serialize_scene(&populated_scene(), &identity);
    let json = original.to_json().unwrap();
    let decoded = SceneSnapshot::from_json(&json).unwrap();

    let mut target = Scene::new(800.0, 600.0);
    assert_eq!(restore_snapshot(&mut target, &decoded, &identity).unwrap(), 3);
    let again = serialize_scene(&target, &identity);

    assert_eq!(again.len(), original.len());
    for (a, b) in original.objects.iter().zip(&again.objects) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.visual_type, b.visual_type);
        for (x, y) in [
            (a.x, b.x),
            (a.y, b.y),
            (a.scale_x, b.scale_x),
            (a.scale_y, b.scale_y),
            (a.rotation, b.rotation),
            (a.width, b.width),
            (a.height, b.height),
        ] {
            assert!((x - y).abs() < EPS, "{} != {}", x, y);
        }
        assert_eq!(a.text, b.text);
        assert_eq!(a.font_weight, b.font_weight);
        assert_eq!(a.src, b.src);
        assert_eq!(a.path_data, b.path_data);
    }
}

#[test]
fn test_restore_keeps_system_layer() {
    let identity = IdentityParams::default();
    let snapshot = serialize_scene(&populated_scene(), &identity);

    let mut target = populated_scene();
    target.add(ObjectContent::Text(TextContent::new("gone")), Transform2D::default());
    restore_snapshot(&mut target, &snapshot, &identity).unwrap();

    let kinds: Vec<_> = target.objects().iter().map(|o| o.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ObjectKind::MockupBackground,
            ObjectKind::PrintGuide,
            ObjectKind::Text,
            ObjectKind::Image,
            ObjectKind::VectorGraphic,
        ]
    );
}

#[test]
fn test_non_finite_snapshot_leaves_scene_untouched() {
    let identity = IdentityParams::default();
    let mut snapshot = serialize_scene(&populated_scene(), &identity);
    snapshot.objects[1].x = f64::NAN;

    let mut target = Scene::new(800.0, 600.0);
    target.add(ObjectContent::Text(TextContent::new("stay")), Transform2D::default());
    assert!(restore_snapshot(&mut target, &snapshot, &identity).is_err());
    assert_eq!(target.user_count(), 1);
}

#[test]
fn test_legacy_fabric_snapshot_restores() {
    let json = r##"{
        "version": "5.3.0",
        "objects": [
            {"type":"image","name":"mockup","left":400,"top":300,"width":1000,"height":1000,"selectable":false},
            {"type":"rect","left":400,"top":260,"width":150,"height":120,"fill":"transparent",
             "strokeDashArray":[5,5],"selectable":false},
            {"type":"i-text","left":380,"top":250,"angle":10,"text":"Hi","fontWeight":"bold","selectable":false},
            {"type":"image","left":400,"top":300,"width":790,"height":790}
        ]
    }"##;
    let snapshot = SceneSnapshot::from_json(json).unwrap();
    assert!(snapshot.is_legacy());

    let mut scene = Scene::new(800.0, 600.0);
    let restored = restore_snapshot(&mut scene, &snapshot, &IdentityParams::default()).unwrap();
    assert_eq!(restored, 1);
    let text = scene.user_objects().next().unwrap();
    assert!(text.editable);
    assert_eq!(text.transform.rotation, 10.0);
    assert!(text.text().unwrap().is_bold());
}
