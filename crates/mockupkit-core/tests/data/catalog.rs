use mockupkit_core::data::{PreviewDefinition, ProductCatalog};
use mockupkit_core::CatalogError;
use std::collections::HashSet;

fn with_content<'a>(keys: &'a [&'a str]) -> impl Fn(&str) -> bool + 'a {
    move |k: &str| keys.iter().any(|key| *key == k)
}

#[test]
fn test_builtin_catalog_products() {
    let catalog = ProductCatalog::builtin();
    assert_eq!(catalog.len(), 4);

    let hoodie = catalog.get("hoodie-heavy-blend").unwrap();
    let front = hoodie.side("front").unwrap();
    assert_eq!(front.print_dimensions.width, 150.0);
    assert_eq!(front.print_dimensions.height, 120.0);
    assert_eq!(front.print_dimensions.top_offset, -40.0);
    assert_eq!(hoodie.mockup_for("back"), Some("/mockups/hoodies/back.png"));
    assert_eq!(hoodie.preview_mockups.len(), 6);

    let crewneck = catalog.get("crewneck-heavy-blend").unwrap();
    assert_eq!(crewneck.side("neck").unwrap().print_dimensions.top_offset, -170.0);

    let mug = catalog.get("ceramic-mug").unwrap();
    assert_eq!(mug.first_side().unwrap().key, "mug");
    assert_eq!(mug.side("mug").unwrap().print_dimensions.width, 1160.0);
}

#[test]
fn test_unknown_lookups() {
    let catalog = ProductCatalog::builtin();
    assert!(matches!(
        catalog.get("poster"),
        Err(CatalogError::UnknownProduct { .. })
    ));

    let tshirt = catalog.get("garment-dyed-tshirt").unwrap();
    assert!(matches!(
        tshirt.side("neck"),
        Err(CatalogError::UnknownSide { .. })
    ));
    assert!(matches!(
        tshirt.preview("person9"),
        Err(CatalogError::UnknownPreview { .. })
    ));
}

#[test]
fn test_side_for_preview_exact_and_fallbacks() {
    let catalog = ProductCatalog::builtin();
    let tshirt = catalog.get("garment-dyed-tshirt").unwrap();

    let both = ["front", "back"];
    assert_eq!(tshirt.side_for_preview("front", with_content(&both)), Some("front"));
    assert_eq!(tshirt.side_for_preview("person1Back", with_content(&both)), Some("back"));
    assert_eq!(tshirt.side_for_preview("folded", with_content(&both)), Some("front"));

    // back previews fall back to the front when the back is empty
    let front_only = ["front"];
    assert_eq!(
        tshirt.side_for_preview("person3Back", with_content(&front_only)),
        Some("front")
    );

    assert_eq!(tshirt.side_for_preview("person2", with_content(&[])), None);
}

#[test]
fn test_side_for_preview_sleeves_and_mug() {
    let catalog = ProductCatalog::builtin();
    let hoodie = catalog.get("hoodie-heavy-blend").unwrap();
    let sides = ["front", "sleeveLeft", "sleeveRight"];
    assert_eq!(
        hoodie.side_for_preview("sleeveLeftDetail", with_content(&sides)),
        Some("sleeveLeft")
    );
    assert_eq!(
        hoodie.side_for_preview("SleeveDetail", with_content(&sides)),
        Some("sleeveRight")
    );

    let mug = catalog.get("ceramic-mug").unwrap();
    assert_eq!(mug.side_for_preview("mug", with_content(&["mug"])), Some("mug"));
    // explicit side mapping wins even before content exists
    assert_eq!(mug.side_for_preview("mug", with_content(&[])), Some("mug"));
}

#[test]
fn test_catalog_from_json_accepts_bare_preview_refs() {
    let json = r#"{
        "products": [{
            "id": "tote",
            "sides": [{"key": "front", "label": "Front", "printDimensions": {"width": 220, "height": 260}}],
            "mockups": {"front": "/mockups/tote/front.png"},
            "previewMockups": {
                "front": "/previews/tote/Front.png",
                "street": {
                    "label": "Street",
                    "mockupImageRef": "/previews/tote/Street.png",
                    "usesSideKey": "front",
                    "printArea": {"leftOffset": 12, "topOffset": -30, "rotation": 8, "width": 120}
                }
            }
        }]
    }"#;

    let catalog = ProductCatalog::from_json(json).unwrap();
    let tote = catalog.get("tote").unwrap();
    let front = tote.side("front").unwrap();
    assert_eq!(front.print_dimensions.left_offset, 0.0);

    assert_eq!(
        tote.preview("front").unwrap(),
        &PreviewDefinition::new("", "/previews/tote/Front.png")
    );
    let street = tote.preview("street").unwrap();
    let area = street.print_area.unwrap();
    assert_eq!(area.rotation, 8.0);
    assert_eq!(area.width, Some(120.0));
    assert_eq!(street.uses_side_key.as_deref(), Some("front"));
}

#[test]
fn test_catalog_rejects_product_without_sides() {
    let json = r#"[{"id": "empty", "sides": []}]"#;
    let err = ProductCatalog::from_json(json).unwrap_err();
    assert!(err.to_string().contains("defines no sides"));
}

#[test]
fn test_catalog_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let builtin = ProductCatalog::builtin();
    std::fs::write(&path, serde_json::to_string_pretty(&builtin).unwrap()).unwrap();

    let loaded = ProductCatalog::load_from_file(&path).unwrap();
    let ids: HashSet<_> = loaded.products().iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains("ceramic-mug"));
    assert_eq!(loaded.products(), builtin.products());
}
