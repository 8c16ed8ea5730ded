use std::sync::atomic::Ordering;
use std::time::Duration;

use mockupkit_core::{AppEvent, AssetError, AssetEvent, ObjectKind};
use mockupkit_designer::{DesignDocument, ObjectData, SceneSnapshot};

use crate::common::{
    count_canvas_changes, hoodie_session, record_events, FakeLoader, NoFonts, SlowFonts,
};

const FRONT_MOCKUP: &str = "/mockups/hoodies/front.png";

#[tokio::test(start_paused = true)]
async fn test_edit_burst_notifies_once() {
    let mut session = hoodie_session();
    let changes = count_canvas_changes(&session);

    let id = session.add_text(None).unwrap();
    session.set_position(id, 390.0, 250.0);
    session.set_rotation(id, 15.0);
    assert!(session.has_pending_change());
    assert_eq!(changes.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(changes.load(Ordering::SeqCst), 1);
    assert!(!session.has_pending_change());
}

#[tokio::test(start_paused = true)]
async fn test_switch_flushes_pending_change() {
    let mut session = hoodie_session();
    let changes = count_canvas_changes(&session);

    session.add_text(None).unwrap();
    session.switch_side("back").unwrap();
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_drops_pending_change() {
    let mut session = hoodie_session();
    let changes = count_canvas_changes(&session);

    session.add_text(None).unwrap();
    session.dispose();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(changes.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_font_falls_back() {
    let mut session = hoodie_session();
    let events = record_events(&session);
    let id = session.add_text(None).unwrap();

    let fonts = SlowFonts(Duration::from_secs(30));
    assert!(session.set_font_family(id, "Pacifico", &fonts).await);

    let text = session.scene().get(id).unwrap().text().unwrap();
    assert_eq!(text.font_family, "sans-serif");
    assert!(events.lock().unwrap().iter().any(|e| matches!(
        e,
        AppEvent::Asset(AssetEvent::FontFallback { requested, .. }) if requested == "Pacifico"
    )));
}

#[tokio::test(start_paused = true)]
async fn test_ready_font_is_applied() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();

    let fonts = SlowFonts(Duration::from_millis(300));
    assert!(session.set_font_family(id, "Pacifico", &fonts).await);
    assert_eq!(
        session.scene().get(id).unwrap().text().unwrap().font_family,
        "Pacifico"
    );
    assert!(session.can_undo());
}

#[tokio::test]
async fn test_unknown_font_falls_back() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    assert!(session.set_font_family(id, "NoSuchFace", &NoFonts).await);
    assert_eq!(
        session.scene().get(id).unwrap().text().unwrap().font_family,
        "sans-serif"
    );
}

#[tokio::test]
async fn test_mockup_is_placed_once() {
    let mut session = hoodie_session();
    let loader = FakeLoader::default().with(FRONT_MOCKUP, 1000, 1000);

    let first = session.load_mockup(&loader).await.unwrap().unwrap();
    let second = session.load_mockup(&loader).await.unwrap().unwrap();
    assert_eq!(first, second);

    let scene = session.scene();
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.objects()[0].kind(), ObjectKind::MockupBackground);
    assert_eq!(scene.objects()[1].kind(), ObjectKind::PrintGuide);
    let background = scene.background().unwrap();
    assert!((background.transform.scale_x - 0.48).abs() < 1e-12);
    assert_eq!((background.transform.x, background.transform.y), (400.0, 300.0));
    assert_eq!(session.background_ref(), Some(FRONT_MOCKUP));
    // placing the mockup is not an undoable edit
    assert!(!session.can_undo());
}

#[tokio::test]
async fn test_stale_mockup_is_discarded() {
    let mut session = hoodie_session();
    let events = record_events(&session);

    let ticket = session.begin_mockup_load();
    session.switch_side("back").unwrap();
    let result = session.complete_mockup_load(&ticket, FRONT_MOCKUP, 1000.0, 1000.0);

    assert!(matches!(result, Err(AssetError::Stale { .. })));
    assert!(session.scene().background().is_none());
    assert!(events.lock().unwrap().iter().any(|e| matches!(
        e,
        AppEvent::Asset(AssetEvent::StaleLoadDiscarded { side, .. }) if side == "front"
    )));
}

#[tokio::test]
async fn test_load_after_dispose_is_discarded() {
    let mut session = hoodie_session();
    let ticket = session.begin_mockup_load();
    session.dispose();
    assert!(session
        .complete_mockup_load(&ticket, FRONT_MOCKUP, 1000.0, 1000.0)
        .is_err());
    assert!(session.scene().background().is_none());
}

#[tokio::test]
async fn test_failed_load_leaves_scene_unchanged() {
    let mut session = hoodie_session();
    let events = record_events(&session);
    let before = session.scene().len();

    assert!(session.load_mockup(&FakeLoader::default()).await.is_err());
    assert!(session
        .load_image_from(&FakeLoader::default(), "missing.png")
        .await
        .is_err());
    assert_eq!(session.scene().len(), before);
    let failures = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, AppEvent::Asset(AssetEvent::LoadFailed { .. })))
        .count();
    assert_eq!(failures, 2);
}

#[tokio::test]
async fn test_upload_is_inserted_scaled() {
    let mut session = hoodie_session();
    let loader = FakeLoader::default().with("upload.png", 2000, 1000);

    let id = session
        .load_image_from(&loader, "upload.png")
        .await
        .unwrap()
        .unwrap();
    let object = session.scene().get(id).unwrap();
    assert_eq!(object.kind(), ObjectKind::Image);
    assert!((object.transform.scale_x - 250.0 / 2000.0).abs() < 1e-12);
    assert_eq!(object.clip, Some(session.print_rect()));
}

#[tokio::test]
async fn test_leaked_mockup_at_editor_scale_is_purged() {
    let mut session = hoodie_session();
    let loader = FakeLoader::default().with(FRONT_MOCKUP, 1200, 1200);
    session.load_mockup(&loader).await.unwrap().unwrap();
    let placed = session.scene().background().unwrap().transform;
    assert!((placed.scale_x - 0.4).abs() < 1e-12);

    let leaked = ObjectData {
        visual_type: Some("image".into()),
        x: placed.x,
        y: placed.y,
        width: 1200.0,
        height: 1200.0,
        scale_x: placed.scale_x,
        scale_y: placed.scale_y,
        src: Some(FRONT_MOCKUP.into()),
        ..Default::default()
    };
    let text = ObjectData {
        kind: Some("text".into()),
        text: Some("keep".into()),
        x: 400.0,
        y: 260.0,
        ..Default::default()
    };
    let mut document = DesignDocument::new("d", "hoodie-heavy-blend", "front");
    document
        .sides
        .insert("front".into(), Some(SceneSnapshot::new(vec![leaked, text], 800.0, 600.0)));
    session.apply_document(&document).unwrap();

    assert_eq!(session.scene().user_count(), 1);
    assert_eq!(session.snapshot_for("front").map(|s| s.len()), Some(1));
}
