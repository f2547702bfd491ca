//! Rate-limited, deduplicated notice queue. Provider failures can
//! cascade (one failing paragraph-by-paragraph run emits the same error
//! dozens of times); this gates how often the user-facing sink fires.
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type NoticeSink = Arc<dyn Fn(&str) + Send + Sync>;

struct Notice {
    message: String,
    timeout: Duration,
}

struct Inner {
    pending: Mutex<VecDeque<Notice>>,
    /// Messages currently shown or queued (unique mode only)
    active: DashMap<String, ()>,
    in_flight: AtomicUsize,
    sink: NoticeSink,
    max_pending: usize,
    unique: bool,
    default_timeout: Duration,
}

fn dispatch(inner: &Arc<Inner>, notice: Notice) {
    (inner.sink)(&notice.message);
    inner.in_flight.fetch_add(1, Ordering::Relaxed);
    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        tokio::time::sleep(notice.timeout).await;
        inner.in_flight.fetch_sub(1, Ordering::Relaxed);
        if inner.unique {
            inner.active.remove(&notice.message);
        }
    });
}

pub struct NoticeQueue {
    inner: Arc<Inner>,
    ticker: tokio::task::JoinHandle<()>,
}

impl NoticeQueue {
    /// `max_pending == 0` means: fire immediately when nothing is in
    /// flight, drop everything else until it clears.
    pub fn new(
        max_pending: usize,
        interval: Duration,
        unique: bool,
        default_timeout: Duration,
        sink: NoticeSink,
    ) -> Self {
        let inner = Arc::new(Inner {
            pending: Mutex::new(VecDeque::new()),
            active: DashMap::new(),
            in_flight: AtomicUsize::new(0),
            sink,
            max_pending,
            unique,
            default_timeout,
        });

        // Drains one queued notice per tick, in FIFO arrival order
        let drain = Arc::clone(&inner);
        let ticker = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                ticker.tick().await;
                let next = drain.pending.lock().expect("queue lock poisoned").pop_front();
                if let Some(notice) = next {
                    dispatch(&drain, notice);
                }
            }
        });

        Self { inner, ticker }
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.enqueue(message.into(), None);
    }

    pub fn notify_with_timeout(&self, message: impl Into<String>, timeout: Duration) {
        self.enqueue(message.into(), Some(timeout));
    }

    /// Bypasses queue, capacity and uniqueness; fires right now.
    pub fn notify_priority(&self, message: impl Into<String>) {
        (self.inner.sink)(&message.into());
    }

    fn enqueue(&self, message: String, timeout: Option<Duration>) {
        let inner = &self.inner;
        if inner.unique && inner.active.contains_key(&message) {
            // structurally-equal notice already active: dropped silently
            return;
        }
        let notice = Notice {
            timeout: timeout.unwrap_or(inner.default_timeout),
            message,
        };

        if inner.max_pending == 0 {
            if inner.in_flight.load(Ordering::Relaxed) == 0 {
                if inner.unique {
                    inner.active.insert(notice.message.clone(), ());
                }
                dispatch(inner, notice);
            }
            return;
        }

        let mut pending = inner.pending.lock().expect("queue lock poisoned");
        if pending.len() >= inner.max_pending {
            return;
        }
        if inner.unique {
            inner.active.insert(notice.message.clone(), ());
        }
        pending.push_back(notice);
    }

    /// Queued notices not yet drained
    pub fn pending(&self) -> usize {
        self.inner.pending.lock().expect("queue lock poisoned").len()
    }
}

impl Drop for NoticeQueue {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
