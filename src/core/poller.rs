//! Interval-driven polling watchers.
//!
//! Each watcher performs one immediate fetch on activation, then
//! refreshes on a fixed interval until stopped. The last known value is
//! retained while a refresh is outstanding, and stopping a watcher
//! guarantees that nothing is published afterwards.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::core::client::{
    DetectionResult, NetworkMetricsSample, SystemHealth, TelemetryClient, TelemetryError,
};

/// Latest state published by a watcher
#[derive(Debug, Clone)]
pub struct PollSnapshot<T> {
    /// Most recent successfully fetched value, if any
    pub data: Option<T>,
    /// True until the first fetch has settled
    pub is_loading: bool,
    /// Human-readable message for the most recent fetch error
    pub error: Option<String>,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }
}

/// Handle to a running watcher
pub struct PollHandle<T> {
    rx: watch::Receiver<PollSnapshot<T>>,
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl<T: Clone> PollHandle<T> {
    /// Current snapshot
    pub fn latest(&self) -> PollSnapshot<T> {
        self.rx.borrow().clone()
    }
}

impl<T> PollHandle<T> {
    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.rx.clone()
    }

    /// Stop polling. No state is published after this returns.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a watcher driving `fetch` once immediately and then on every
/// interval tick.
///
/// Fetches are issued one at a time; a tick that fires while a fetch is
/// still outstanding is skipped, so published state always reflects the
/// newest completed fetch.
pub fn spawn_poller<T, F, Fut>(interval: Duration, fetch: F) -> PollHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, TelemetryError>> + Send + 'static,
{
    let (tx, rx) = watch::channel(PollSnapshot::default());
    let stopped = Arc::new(AtomicBool::new(false));
    let guard = Arc::clone(&stopped);

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if guard.load(Ordering::SeqCst) {
                break;
            }

            let result = fetch().await;

            // A fetch settling after stop() must not update retained state.
            if guard.load(Ordering::SeqCst) {
                break;
            }

            tx.send_modify(|snapshot| {
                match result {
                    Ok(data) => {
                        snapshot.data = Some(data);
                        snapshot.error = None;
                    }
                    Err(err) => {
                        snapshot.error = Some(err.to_string());
                    }
                }
                snapshot.is_loading = false;
            });
        }
    });

    PollHandle { rx, stopped, task }
}

/// Watch current network metrics, refreshing on the given interval
pub fn watch_network_metrics(
    client: Arc<TelemetryClient>,
    interval: Duration,
) -> PollHandle<NetworkMetricsSample> {
    spawn_poller(interval, move || {
        let client = Arc::clone(&client);
        async move { Ok(client.fetch_network_metrics().await) }
    })
}

/// Watch recent detections, refreshing on the given interval
pub fn watch_recent_detections(
    client: Arc<TelemetryClient>,
    interval: Duration,
    limit: usize,
) -> PollHandle<Vec<DetectionResult>> {
    spawn_poller(interval, move || {
        let client = Arc::clone(&client);
        async move { Ok(client.fetch_recent_detections(limit).await) }
    })
}

/// Watch the system health posture, refreshing on the given interval
pub fn watch_system_health(
    client: Arc<TelemetryClient>,
    interval: Duration,
) -> PollHandle<SystemHealth> {
    spawn_poller(interval, move || {
        let client = Arc::clone(&client);
        async move { Ok(client.fetch_system_health().await) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use crate::core::transport::{MockTransport, TransportResponse};

    #[tokio::test(start_paused = true)]
    async fn test_immediate_fetch_then_interval_cadence() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let handle = spawn_poller(Duration::from_millis(1000), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TelemetryError>(42u32)
            }
        });

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(handle.latest().data, Some(42));

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_stop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let handle = spawn_poller(Duration::from_millis(1000), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TelemetryError>(())
            }
        });

        time::sleep(Duration::from_millis(1010)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        handle.stop();
        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_known_good_retained_across_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let handle = spawn_poller(Duration::from_millis(500), move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Ok(7u32)
                } else {
                    Err(TelemetryError::Status(500))
                }
            }
        });

        time::sleep(Duration::from_millis(10)).await;
        let snapshot = handle.latest();
        assert_eq!(snapshot.data, Some(7));
        assert!(snapshot.error.is_none());
        assert!(!snapshot.is_loading);

        time::sleep(Duration::from_millis(500)).await;
        let snapshot = handle.latest();
        assert_eq!(snapshot.data, Some(7));
        assert_eq!(snapshot.error, Some("unexpected status code: 500".to_string()));
    }

    // A backend returning 500 on every request is masked by mock
    // substitution: the watcher keeps publishing fresh samples and its
    // error flag stays clear.
    #[tokio::test(start_paused = true)]
    async fn test_metrics_watcher_masks_backend_failures() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(TransportResponse { status: 500, body: String::new() }));
        let client = Arc::new(TelemetryClient::new(Arc::new(transport)));

        let handle = watch_network_metrics(client, Duration::from_millis(1000));
        let mut rx = handle.subscribe();

        rx.changed().await.unwrap();
        let first = rx.borrow().clone();
        rx.changed().await.unwrap();
        let second = rx.borrow().clone();

        let first = first.data.expect("first sample");
        let second = second.data.expect("second sample");
        assert_ne!(first, second);
        assert!(handle.latest().error.is_none());
        assert!(!handle.latest().is_loading);
    }
}
