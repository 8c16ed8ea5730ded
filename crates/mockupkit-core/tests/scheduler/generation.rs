use mockupkit_core::Generation;

#[test]
fn test_ticket_is_current_until_invalidated() {
    let generation = Generation::new();
    let ticket = generation.begin("front");
    assert_eq!(ticket.generation(), 0);
    assert_eq!(ticket.side_key(), "front");
    assert!(generation.is_current(&ticket, "front"));

    assert_eq!(generation.invalidate(), 1);
    assert!(!generation.is_current(&ticket, "front"));

    let fresh = generation.begin("back");
    assert!(generation.is_current(&fresh, "back"));
}

#[test]
fn test_ticket_for_other_side_is_stale() {
    let generation = Generation::new();
    let ticket = generation.begin("front");
    assert!(!generation.is_current(&ticket, "back"));
}

#[test]
fn test_shutdown_refuses_everything() {
    let generation = Generation::new();
    generation.shutdown();
    assert!(!generation.is_alive());
    let ticket = generation.begin("front");
    assert!(!generation.is_current(&ticket, "front"));
}
