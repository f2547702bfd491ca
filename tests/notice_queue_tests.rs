//! Rate-limited notice queue tests
use lingo::application::notify::{NoticeQueue, NoticeSink};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn recording_sink() -> (NoticeSink, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let sink: NoticeSink = Arc::new(move |message: &str| {
        recorder.lock().unwrap().push(message.to_string());
    });
    (sink, seen)
}

#[tokio::test(start_paused = true)]
async fn duplicate_notices_fire_once_until_timeout() {
    let (sink, seen) = recording_sink();
    let queue = NoticeQueue::new(
        1,
        Duration::from_millis(100),
        true,
        Duration::from_millis(400),
        sink,
    );

    queue.notify("translation failed");
    queue.notify("translation failed");
    assert_eq!(queue.pending(), 1);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);

    // Still inside the active window: duplicates keep being dropped
    queue.notify("translation failed");
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);

    // After the timeout the same message may fire again
    tokio::time::sleep(Duration::from_millis(400)).await;
    queue.notify("translation failed");
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn queue_drains_in_fifo_order() {
    let (sink, seen) = recording_sink();
    let queue = NoticeQueue::new(
        3,
        Duration::from_millis(100),
        false,
        Duration::from_millis(50),
        sink,
    );

    queue.notify("first");
    queue.notify("second");
    queue.notify("third");

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["first".to_string(), "second".to_string(), "third".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn queue_capacity_drops_overflow() {
    let (sink, seen) = recording_sink();
    let queue = NoticeQueue::new(
        2,
        Duration::from_millis(100),
        false,
        Duration::from_millis(50),
        sink,
    );

    queue.notify("a");
    queue.notify("b");
    queue.notify("c"); // over capacity, dropped
    assert_eq!(queue.pending(), 2);

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn priority_bypasses_queue_and_uniqueness() {
    let (sink, seen) = recording_sink();
    let queue = NoticeQueue::new(
        1,
        Duration::from_millis(100),
        true,
        Duration::from_millis(400),
        sink,
    );

    queue.notify("urgent");
    queue.notify_priority("urgent");
    queue.notify_priority("urgent");
    // Both priority calls fired synchronously, queue untouched
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(queue.pending(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_capacity_means_one_in_flight() {
    let (sink, seen) = recording_sink();
    let queue = NoticeQueue::new(
        0,
        Duration::from_millis(100),
        false,
        Duration::from_millis(300),
        sink,
    );

    queue.notify("a"); // fires immediately, nothing was in flight
    queue.notify("b"); // dropped while "a" is in flight
    assert_eq!(seen.lock().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(350)).await;
    queue.notify("c"); // previous notice cleared
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["a".to_string(), "c".to_string()]
    );
}
