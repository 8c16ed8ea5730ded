use mockupkit_core::HistoryError;
use mockupkit_designer::HistoryManager;

#[test]
fn test_depth_limit_keeps_newest_entries() {
    let mut history = HistoryManager::with_depth(0, 20);
    for i in 1..=25 {
        history.record(i);
    }
    assert_eq!(history.len(), 20);
    assert_eq!(history.entries().first(), Some(&6));
    assert_eq!(history.current(), Some(&25));

    // the sentinel is gone, so the oldest retained entry is reachable
    let mut undone = 0;
    while history.undo(|_| Ok::<(), String>(())).unwrap() {
        undone += 1;
    }
    assert_eq!(undone, 19);
    assert_eq!(history.current(), Some(&6));
}

#[test]
fn test_undo_redo_at_bounds_are_noops() {
    let mut history = HistoryManager::new(0);
    assert!(!history.undo(|_| Ok::<(), String>(())).unwrap());
    assert!(!history.redo(|_| Ok::<(), String>(())).unwrap());

    history.record(1);
    history.record(2);
    assert!(!history.redo(|_| Ok::<(), String>(())).unwrap());
    assert_eq!(history.cursor(), 2);
}

#[test]
fn test_record_discards_redo_branch() {
    let mut history = HistoryManager::new(0);
    history.record(1);
    history.record(2);
    history.record(3);
    history.undo(|_| Ok::<(), String>(())).unwrap();
    history.undo(|_| Ok::<(), String>(())).unwrap();
    assert!(history.can_redo());

    history.record(10);
    assert!(!history.can_redo());
    assert_eq!(history.entries(), &[0, 1, 10]);
}

#[test]
fn test_restore_receives_target_entry() {
    let mut history = HistoryManager::new("a");
    history.record("b");
    history.record("c");
    let mut seen = None;
    history
        .undo(|entry| {
            seen = Some(*entry);
            Ok::<(), String>(())
        })
        .unwrap();
    assert_eq!(seen, Some("b"));
}

#[test]
fn test_failed_redo_reports_index() {
    let mut history = HistoryManager::new(0);
    history.record(1);
    history.record(2);
    history.undo(|_| Ok::<(), String>(())).unwrap();

    let err = history.redo(|_| Err("corrupt")).unwrap_err();
    assert!(matches!(err, HistoryError::RestoreFailed { index: 2, .. }));
    assert_eq!(history.cursor(), 1);
    assert!(history.can_redo());
}
