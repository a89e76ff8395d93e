use crate::{feed::Feed, source::FetchError};
use std::{future::Future, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Refreshes a [`Feed`] on a fixed interval until stopped.
///
/// The first fetch runs one period after start, the caller loads the initial
/// value itself. A failed fetch keeps the previous value and is retried on
/// the next tick.
/// Once stopped, a fetch still in flight is dropped and never published.
pub struct PeriodicTask {
    name: &'static str,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn start<T, F, Fut>(name: &'static str, period: Duration, feed: Feed<T>, fetch: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {}
                }
                let result = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    result = fetch() => result,
                };
                match result {
                    Ok(value) => {
                        feed.publish(value);
                        debug!("Refreshed {name}");
                    }
                    Err(err) => warn!("Refreshing {name} failed, keeping previous data: {err}"),
                }
            }
            debug!("Stopped refreshing {name}");
        });
        info!("Refreshing {name} every {period:?}");
        Self {
            name,
            token,
            handle: Some(handle),
        }
    }

    /// Stops the loop and waits for it to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("Refresh task {} ended badly: {err}", self.name);
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline::store;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    #[tokio::test]
    async fn publishes_and_keeps_last_good_test() {
        let feed = Feed::new(0u32);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let task = PeriodicTask::start("numbers", Duration::from_millis(5), feed.clone(), move || {
            let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call == 1 {
                    Ok(call)
                } else {
                    Err(FetchError::Store(store::Error::CollectionNotFound("numbers".into())))
                }
            }
        });
        tokio::time::sleep(Duration::from_millis(60)).await;
        task.stop().await;

        assert!(calls.load(Ordering::SeqCst) > 1);
        assert_eq!(*feed.latest(), 1);
    }

    #[tokio::test]
    async fn first_fetch_waits_one_period_test() {
        let feed = Feed::new(0u32);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let task = PeriodicTask::start("idle", Duration::from_secs(60), feed.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(1) }
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        task.stop().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(feed.updated_at().is_none());
    }

    #[tokio::test]
    async fn stop_discards_in_flight_fetch_test() {
        let feed = Feed::new(0u32);
        let task = PeriodicTask::start("slow", Duration::from_millis(5), feed.clone(), || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(42)
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        task.stop().await;
        assert_eq!(*feed.latest(), 0);
        assert!(feed.updated_at().is_none());
    }
}
