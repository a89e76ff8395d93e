use busline::shared::time::Timestamp;
use std::sync::Arc;
use tokio::sync::watch;

/// The latest value of something that changes over time, whether it is
/// polled or pushed. Readers always get a whole value, never a partial one.
pub struct Feed<T> {
    tx: Arc<watch::Sender<Snapshot<T>>>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

struct Snapshot<T> {
    value: Arc<T>,
    /// `None` until the first value is published.
    updated_at: Option<Timestamp>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            updated_at: self.updated_at,
        }
    }
}

impl<T> Feed<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(Snapshot {
            value: Arc::new(initial),
            updated_at: None,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the current value. Readers holding the previous one keep it.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(Snapshot {
            value: Arc::new(value),
            updated_at: Some(Timestamp::now()),
        });
    }

    pub fn latest(&self) -> Arc<T> {
        self.tx.borrow().value.clone()
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.tx.borrow().updated_at
    }
}

#[test]
fn publish_replaces_latest_test() {
    let feed = Feed::new(0u32);
    let reader = feed.clone();
    let before = reader.latest();
    assert!(feed.updated_at().is_none());

    feed.publish(7);
    assert_eq!(*before, 0);
    assert_eq!(*reader.latest(), 7);
    assert!(reader.updated_at().is_some());
}
