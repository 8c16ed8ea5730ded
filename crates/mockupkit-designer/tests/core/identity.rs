use mockupkit_designer::{
    classify, classify_object, purge_imposters, IdentityParams, ImageContent, ObjectContent,
    ObjectData, ObjectRole, Scene, TextContent, Transform2D,
};
use mockupkit_core::PrintDimensions;

#[test]
fn test_leaked_background_is_purged() {
    let mut scene = Scene::new(800.0, 600.0);
    scene.ensure_print_guide(&PrintDimensions::new(150.0, 120.0));
    let leaked = scene.add(
        ObjectContent::Image(ImageContent::new("/mockups/hoodies/front.png", 1200.0, 1200.0)),
        // editor fill: 600 * 0.8 / 1200
        Transform2D::at(400.0, 300.0).with_scale(0.4, 0.4),
    );
    let text = scene.add(ObjectContent::Text(TextContent::new("keep")), Transform2D::default());

    let params = IdentityParams::default();
    assert_eq!(
        classify_object(scene.get(leaked).unwrap(), 800.0, &params),
        ObjectRole::Imposter
    );
    assert_eq!(purge_imposters(&mut scene, &params), 1);
    assert!(scene.get(leaked).is_none());
    assert!(scene.get(text).is_some());
    assert!(scene.print_guide().is_some());
}

#[test]
fn test_named_upload_is_not_an_imposter() {
    let mut scene = Scene::new(800.0, 600.0);
    let id = scene.add(
        ObjectContent::Image(ImageContent::new("big.png", 2000.0, 2000.0)),
        Transform2D::default(),
    );
    if let Some(object) = scene.get_mut(id) {
        object.name = Some("user-image".to_string());
    }
    assert_eq!(purge_imposters(&mut scene, &IdentityParams::default()), 0);
}

#[test]
fn test_ratio_is_tunable() {
    let data = ObjectData {
        visual_type: Some("image".into()),
        width: 500.0,
        ..Default::default()
    };
    let strict = IdentityParams {
        editable_imposter_ratio: 0.5,
        ..Default::default()
    };
    assert_eq!(classify(&data, 800.0, &IdentityParams::default()), ObjectRole::User);
    assert_eq!(classify(&data, 800.0, &strict), ObjectRole::Imposter);
}

#[test]
fn test_legacy_guide_without_tag() {
    let data: ObjectData = serde_json::from_str(
        r##"{"type":"rect","left":400,"top":300,"width":150,"height":120,
             "fill":"transparent","stroke":"#999","strokeDashArray":[5,5],"selectable":false}"##,
    )
    .unwrap();
    assert_eq!(classify(&data, 800.0, &IdentityParams::default()), ObjectRole::System);
}
