use std::collections::BTreeMap;

use mockupkit_designer::{DesignDocument, ObjectData, SceneSnapshot};
use tempfile::TempDir;

fn sample() -> DesignDocument {
    let front = SceneSnapshot::new(
        vec![ObjectData {
            kind: Some("text".into()),
            visual_type: Some("textbox".into()),
            x: 400.0,
            y: 260.0,
            text: Some("Front".into()),
            ..Default::default()
        }],
        800.0,
        600.0,
    );
    let mut sides = BTreeMap::new();
    sides.insert("front".to_string(), Some(front));
    sides.insert("back".to_string(), None);
    DesignDocument::new("My hoodie", "hoodie-heavy-blend", "front").with_sides(sides)
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("design.json");

    let mut document = sample();
    document.save_to_file(&path).unwrap();
    let loaded = DesignDocument::load_from_file(&path).unwrap();

    assert_eq!(loaded.metadata.name, "My hoodie");
    assert_eq!(loaded.active_side, "front");
    assert_eq!(loaded.side("front").map(SceneSnapshot::len), Some(1));
    assert!(loaded.side("back").is_none());
    assert_eq!(loaded.sides.len(), 2);
}

#[test]
fn test_load_rejects_newer_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.json");
    let mut document = sample();
    document.version = "9.0".into();
    std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

    assert!(DesignDocument::load_from_file(&path).is_err());
}

#[test]
fn test_load_missing_file_has_context() {
    let dir = TempDir::new().unwrap();
    let err = DesignDocument::load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read design file"));
}
