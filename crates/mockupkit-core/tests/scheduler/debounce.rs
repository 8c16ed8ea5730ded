use mockupkit_core::Debouncer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn counting(delay_ms: u64) -> (Debouncer, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    (debouncer, count)
}

#[tokio::test(start_paused = true)]
async fn test_burst_coalesces_into_one_run() {
    let (debouncer, count) = counting(50);

    for _ in 0..10 {
        debouncer.trigger();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_flush_runs_pending_action_once() {
    let (debouncer, count) = counting(50);

    debouncer.trigger();
    assert!(debouncer.flush());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!debouncer.flush());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_and_drop_prevent_late_runs() {
    let (debouncer, count) = counting(50);
    debouncer.trigger();
    assert!(debouncer.cancel());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    debouncer.trigger();
    drop(debouncer);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_trigger_without_runtime_fires_immediately() {
    let (debouncer, count) = counting(50);
    debouncer.trigger();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}
