use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;

#[tokio::test(start_paused = true)]
async fn join_waits_for_completion() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mut task = TaskHandle::spawn("once", async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        counter.fetch_add(1, Ordering::SeqCst);
    });

    task.join().await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_future_ticks() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mut task = TaskHandle::spawn("ticker", async move {
        let mut interval = tokio::time::interval(Duration::from_millis(10));
        loop {
            interval.tick().await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    tokio::time::sleep(Duration::from_millis(35)).await;
    task.cancel();
    let seen = hits.load(Ordering::SeqCst);
    assert!(seen > 0);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), seen);
    assert!(task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn drop_aborts_task() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let task = TaskHandle::spawn("dropped", async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(task.name(), "dropped");
    drop(task);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cancel_twice_is_harmless() {
    let mut task = TaskHandle::spawn("idle", async {});
    task.cancel();
    task.cancel();
    task.join().await;
    assert!(task.is_finished());
}
