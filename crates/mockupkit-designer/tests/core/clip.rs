use mockupkit_core::{ObjectId, PrintDimensions};
use mockupkit_designer::{
    compute_clip_rect, reapply_clips, ImageContent, ObjectContent, Scene, SceneObject, Size,
    TextContent, Transform2D,
};

#[test]
fn test_clip_rect_centered_on_canvas() {
    let rect = compute_clip_rect(Size::new(800.0, 600.0), &PrintDimensions::new(160.0, 180.0));
    assert_eq!((rect.center_x, rect.center_y), (400.0, 300.0));
    assert_eq!((rect.width, rect.height), (160.0, 180.0));
    assert_eq!(rect.left(), 320.0);
    assert_eq!(rect.bottom(), 390.0);
}

#[test]
fn test_clip_ignores_object_transform() {
    let dims = PrintDimensions::new(150.0, 120.0).with_offset(0.0, -40.0);
    let canvas = Size::new(800.0, 600.0);
    let mut objects = vec![
        SceneObject::new(
            ObjectId(1),
            ObjectContent::Text(TextContent::new("moved")),
            Transform2D::at(10.0, 20.0).with_scale(4.0, 0.5).with_rotation(73.0),
        ),
        SceneObject::new(
            ObjectId(2),
            ObjectContent::Image(ImageContent::new("a.png", 50.0, 50.0)),
            Transform2D::at(700.0, 550.0),
        ),
    ];

    assert_eq!(reapply_clips(&mut objects, canvas, &dims), 2);
    let expected = compute_clip_rect(canvas, &dims);
    for object in &objects {
        assert_eq!(object.clip, Some(expected));
    }
}

#[test]
fn test_system_objects_are_never_clipped() {
    let dims = PrintDimensions::new(100.0, 100.0);
    let mut scene = Scene::new(800.0, 600.0);
    scene.ensure_print_guide(&dims);
    scene.add(ObjectContent::Text(TextContent::default()), Transform2D::default());

    let size = scene.size();
    assert_eq!(reapply_clips(scene.objects_mut(), size, &dims), 1);
    assert!(scene.print_guide().unwrap().clip.is_none());
}
