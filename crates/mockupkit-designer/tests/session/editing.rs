use mockupkit_core::ObjectKind;
use mockupkit_designer::{Alignment, EditorOptions, ObjectContent, TextAlign};

use crate::common::{hoodie_session, session_with};

fn assert_clips_follow_print_area(session: &mockupkit_designer::EditorSession) {
    let rect = session.print_rect();
    for object in session.scene().user_objects() {
        assert_eq!(object.clip, Some(rect), "object {} has a stale clip", object.id);
    }
}

#[test]
fn test_new_session_starts_clean() {
    let session = hoodie_session();
    assert_eq!(session.active_side(), "front");
    assert_eq!(session.scene().user_count(), 0);
    assert!(session.scene().print_guide().is_some());
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert!(!session.is_modified());
}

#[test]
fn test_text_is_placed_at_print_area_center() {
    let mut session = hoodie_session();
    let id = session.add_text(Some("Hello")).unwrap();

    let rect = session.print_rect();
    assert_eq!((rect.center_x, rect.center_y), (400.0, 260.0));
    let object = session.scene().get(id).unwrap();
    assert_eq!((object.transform.x, object.transform.y), (400.0, 260.0));
    assert_eq!(object.name.as_deref(), Some("user-text"));
    assert_eq!(object.text().unwrap().content, "Hello");
    assert_eq!(session.selection(), Some(id));
    assert!(session.is_modified());
}

#[test]
fn test_large_uploads_are_scaled_down() {
    let mut session = hoodie_session();
    let wide = session.add_image("wide.png", 1000.0, 500.0).unwrap();
    let tall = session.add_image("tall.png", 300.0, 600.0).unwrap();
    let small = session.add_image("small.png", 200.0, 100.0).unwrap();

    let scale = |id| session.scene().get(id).unwrap().transform.scale_x;
    assert_eq!(scale(wide), 0.25);
    assert!((scale(tall) - 250.0 / 600.0).abs() < 1e-12);
    assert_eq!(scale(small), 1.0);
}

#[test]
fn test_clip_invariant_holds_across_edits() {
    let mut session = hoodie_session();
    let text = session.add_text(None).unwrap();
    assert_clips_follow_print_area(&session);

    let image = session.add_image("a.png", 120.0, 80.0).unwrap();
    session.set_position(text, 10.0, 10.0);
    session.set_rotation(image, 33.0);
    session.set_scale(image, 2.0, 2.0);
    assert_clips_follow_print_area(&session);

    session.duplicate(image);
    session.bring_forward(text);
    assert_clips_follow_print_area(&session);

    session.undo().unwrap();
    assert_clips_follow_print_area(&session);

    session.resize(1000.0, 800.0);
    let rect = session.print_rect();
    assert_eq!((rect.center_x, rect.center_y), (500.0, 360.0));
    assert_clips_follow_print_area(&session);
}

#[test]
fn test_undo_and_redo_insert() {
    let mut session = hoodie_session();
    session.add_text(Some("one")).unwrap();
    assert!(session.can_undo());

    assert!(session.undo().unwrap());
    assert_eq!(session.scene().user_count(), 0);
    assert!(!session.can_undo());
    assert!(!session.undo().unwrap());

    assert!(session.redo().unwrap());
    assert_eq!(session.scene().user_count(), 1);
    assert!(!session.redo().unwrap());
    assert!(session.scene().print_guide().is_some());
}

#[test]
fn test_history_is_bounded() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    for i in 0..24 {
        session.set_position(id, 300.0 + f64::from(i), 250.0);
    }
    assert_eq!(session.history().len(), 20);

    let mut undone = 0;
    while session.undo().unwrap() {
        undone += 1;
    }
    assert_eq!(undone, 19);
}

#[test]
fn test_new_edit_discards_redo_branch() {
    let mut session = hoodie_session();
    session.add_text(Some("a")).unwrap();
    session.add_text(Some("b")).unwrap();
    session.undo().unwrap();
    assert!(session.can_redo());

    session.add_image("c.png", 10.0, 10.0).unwrap();
    assert!(!session.can_redo());
    let kinds: Vec<_> = session.scene().user_objects().map(|o| o.kind()).collect();
    assert_eq!(kinds, vec![ObjectKind::Text, ObjectKind::Image]);
}

#[test]
fn test_drag_burst_records_one_entry() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    let before = session.history().len();

    assert!(session.begin_interaction());
    for step in 0..10 {
        session.set_position(id, 400.0 + f64::from(step), 260.0);
    }
    assert_eq!(session.history().len(), before);
    assert!(session.end_interaction());
    assert_eq!(session.history().len(), before + 1);

    session.undo().unwrap();
    let object = session.scene().user_objects().next().unwrap();
    assert_eq!(object.transform.x, 400.0);
}

#[test]
fn test_duplicate_sits_above_original() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    let copy = session.duplicate(id).unwrap();

    let scene = session.scene();
    assert_eq!(scene.index_of(copy), scene.index_of(id).map(|i| i + 1));
    let (a, b) = (scene.get(id).unwrap(), scene.get(copy).unwrap());
    assert_eq!(b.transform.x - a.transform.x, 10.0);
    assert_eq!(b.transform.y - a.transform.y, 10.0);
    assert_eq!(session.selection(), Some(copy));

    session.undo().unwrap();
    assert_eq!(session.scene().user_count(), 1);
}

#[test]
fn test_system_objects_are_protected() {
    let mut session = hoodie_session();
    let guide = session.scene().print_guide().unwrap().id;

    assert!(!session.delete(guide));
    assert!(!session.select(guide));
    assert!(!session.set_position(guide, 0.0, 0.0));
    assert!(session.duplicate(guide).is_none());
    assert!(session.scene().print_guide().is_some());
}

#[test]
fn test_delete_clears_selection() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    assert!(session.delete_selected());
    assert!(session.selection().is_none());
    assert!(session.scene().get(id).is_none());
    assert!(!session.delete(id));
}

#[test]
fn test_align_to_print_guide() {
    let mut session = hoodie_session();
    let id = session.add_image("logo.png", 100.0, 50.0).unwrap();
    session.set_rotation(id, 90.0);
    let rect = session.print_rect();

    assert!(session.align_to_print_guide(id, Alignment::Left));
    let object = session.scene().get(id).unwrap();
    let extent = object.extent();
    assert!((extent.width - 50.0).abs() < 1e-9);
    assert!((object.transform.x - extent.width / 2.0 - rect.left()).abs() < 1e-9);

    session.align_to_print_guide(id, Alignment::Bottom);
    let object = session.scene().get(id).unwrap();
    assert!((object.transform.y + object.extent().height / 2.0 - rect.bottom()).abs() < 1e-9);

    session.align_to_print_guide(id, Alignment::CenterX);
    assert_eq!(session.scene().get(id).unwrap().transform.x, rect.center_x);
}

#[test]
fn test_layers_are_topmost_first() {
    let mut session = hoodie_session();
    let text = session.add_text(Some("Title")).unwrap();
    let image = session.add_image("logo.png", 64.0, 64.0).unwrap();

    let layers = session.layers();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].id, image);
    assert!(layers[0].selected);
    assert_eq!(layers[1].label, "Title");

    assert!(session.send_backward(image));
    assert_eq!(session.layers()[0].id, text);
    // never below the guide
    assert!(!session.send_backward(image));
    assert!(session.bring_forward(image));
    assert_eq!(session.layers()[0].id, image);
}

#[test]
fn test_visibility_is_undoable() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    assert!(session.toggle_visibility(id));
    assert!(!session.layers()[0].visible);
    session.undo().unwrap();
    assert!(session.layers()[0].visible);
}

#[test]
fn test_text_styling() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();

    assert!(session.toggle_bold(id));
    assert_eq!(session.scene().get(id).unwrap().text().unwrap().font_weight, 700);
    assert!(session.toggle_bold(id));
    assert_eq!(session.scene().get(id).unwrap().text().unwrap().font_weight, 400);

    assert!(session.toggle_italic(id));
    assert!(session.set_text_align(id, TextAlign::Right));
    assert!(session.set_fill_color(id, "#ff0000"));
    assert!(!session.set_font_size(id, 0.0));
    assert!(session.set_font_size(id, 48.0));

    let text = session.scene().get(id).unwrap().text().unwrap();
    assert!(text.is_italic());
    assert_eq!(text.text_align, TextAlign::Right);
    assert_eq!(text.fill_color, "#ff0000");
    assert_eq!(text.font_size, 48.0);

    let image = session.add_image("a.png", 10.0, 10.0).unwrap();
    assert!(!session.toggle_bold(image));
}

#[test]
fn test_pan_mode_refuses_edits() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    session.set_pan_mode(true);

    assert!(session.add_text(None).is_none());
    assert!(!session.set_position(id, 1.0, 1.0));
    assert!(!session.delete(id));
    assert!(session.scene().get(id).unwrap().editable);

    session.set_pan_mode(false);
    assert!(session.set_position(id, 1.0, 1.0));
}

#[test]
fn test_pan_mode_closes_open_drag() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    let before = session.history().len();

    assert!(session.begin_interaction());
    session.set_position(id, 350.0, 240.0);
    session.set_pan_mode(true);
    assert!(!session.is_interacting());
    assert_eq!(session.history().len(), before + 1);

    session.set_pan_mode(false);
    assert!(session.set_rotation(id, 20.0));
    session.undo().unwrap();
    let object = session.scene().user_objects().next().unwrap();
    assert_eq!((object.transform.x, object.transform.y), (350.0, 240.0));
    assert_eq!(object.transform.rotation, 0.0);
}

#[test]
fn test_disposed_session_is_inert() {
    let mut session = hoodie_session();
    let id = session.add_text(None).unwrap();
    session.dispose();

    assert!(session.is_disposed());
    assert!(session.add_text(None).is_none());
    assert!(!session.set_rotation(id, 10.0));
    assert!(!session.undo().unwrap());
    assert!(!session.switch_side("back").unwrap());
    assert_eq!(session.scene().user_count(), 1);
    session.dispose();
}

#[test]
fn test_custom_options() {
    let options = EditorOptions {
        duplicate_offset: 25.0,
        history_depth: 3,
        ..Default::default()
    };
    let mut session = session_with(options);
    let id = session.add_text(None).unwrap();
    let copy = session.duplicate(id).unwrap();
    session.set_rotation(copy, 5.0);

    assert_eq!(session.history().len(), 3);
    let scene = session.scene();
    assert_eq!(scene.get(copy).unwrap().transform.x - scene.get(id).unwrap().transform.x, 25.0);
}

#[test]
fn test_serialized_snapshot_holds_user_objects_only() {
    let mut session = hoodie_session();
    for i in 0..4 {
        session.add_text(Some(&format!("t{}", i)));
    }
    let snapshot = session.serialize();
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot
        .objects
        .iter()
        .all(|o| o.kind.as_deref() == Some("text")));
    assert!(session
        .scene()
        .objects()
        .iter()
        .any(|o| matches!(o.content, ObjectContent::PrintGuide(_))));
}
