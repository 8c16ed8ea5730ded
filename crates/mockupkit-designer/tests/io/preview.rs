use std::collections::BTreeMap;

use mockupkit_core::{PreviewDefinition, PreviewPrintArea, ProductCatalog};
use mockupkit_designer::{ObjectData, PreviewRequest, ProjectionParams, SceneSnapshot, Size};

fn text_snapshot(label: &str) -> SceneSnapshot {
    SceneSnapshot::new(
        vec![ObjectData {
            kind: Some("text".into()),
            visual_type: Some("textbox".into()),
            x: 400.0,
            y: 300.0,
            text: Some(label.into()),
            ..Default::default()
        }],
        800.0,
        600.0,
    )
}

fn sides(entries: &[(&str, Option<SceneSnapshot>)]) -> BTreeMap<String, Option<SceneSnapshot>> {
    entries
        .iter()
        .map(|(k, s)| (k.to_string(), s.clone()))
        .collect()
}

#[test]
fn test_back_preview_falls_back_to_front() {
    let catalog = ProductCatalog::builtin();
    let hoodie = catalog.get("hoodie-heavy-blend").unwrap();
    let map = sides(&[("front", Some(text_snapshot("F"))), ("back", None)]);

    let scene = PreviewRequest::thumbnail(hoodie, "back")
        .compose(&map, &ProjectionParams::default())
        .unwrap();
    assert_eq!(scene.side_key.as_deref(), Some("front"));
    assert_eq!(scene.objects.len(), 1);
    assert_eq!(scene.size, 140.0);
    assert!(scene.background.is_some());
}

#[test]
fn test_explicit_side_and_geometry() {
    let mut product = ProductCatalog::builtin()
        .get("hoodie-heavy-blend")
        .unwrap()
        .clone();
    product.preview_mockups.insert(
        "lifestyle".to_string(),
        PreviewDefinition::new("Lifestyle", "/previews/hoodie/Life.png")
            .with_side("back")
            .with_print_area(PreviewPrintArea {
                left_offset: 20.0,
                top_offset: 0.0,
                rotation: 10.0,
                width: None,
            }),
    );
    let map = sides(&[("front", Some(text_snapshot("F"))), ("back", Some(text_snapshot("B")))]);

    let scene = PreviewRequest::new(&product, "lifestyle")
        .with_background_size(Size::new(1200.0, 800.0))
        .compose(&map, &ProjectionParams::default())
        .unwrap();
    assert_eq!(scene.side_key.as_deref(), Some("back"));
    let placed = &scene.objects[0];
    assert!((placed.transform.rotation - 10.0).abs() < 1e-9);
    assert!((placed.transform.x - 320.0).abs() < 1e-9);

    let background = scene.background.unwrap();
    assert!((background.transform.scale_x - 600.0 * 0.95 / 1200.0).abs() < 1e-9);
}

#[test]
fn test_empty_design_yields_empty_preview() {
    let catalog = ProductCatalog::builtin();
    let hoodie = catalog.get("hoodie-heavy-blend").unwrap();
    let scene = PreviewRequest::new(hoodie, "front")
        .compose(&sides(&[("front", None)]), &ProjectionParams::default())
        .unwrap();
    assert!(scene.is_empty());
    assert!(scene.side_key.is_none());
}

#[test]
fn test_unknown_preview_is_an_error() {
    let catalog = ProductCatalog::builtin();
    let hoodie = catalog.get("hoodie-heavy-blend").unwrap();
    assert!(PreviewRequest::new(hoodie, "nope")
        .compose(&BTreeMap::new(), &ProjectionParams::default())
        .is_err());
}
