use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    config::TrackerConfig,
    models::{InteractionEvent, QueuedEvent},
};

use super::transport::InteractionTransport;

/// Coalescing key for pending dispatches.
///
/// The item kind is not part of the key: item IDs are unique across the
/// movie and book catalogs, so (id, event kind) identifies a dispatch.
type DispatchKey = (Uuid, crate::models::EventKind);

/// Best-effort, deduplicated behavioral telemetry
///
/// `track` never blocks and never fails at the call boundary: invalid events
/// are dropped with a warning, rapid repeats for the same (item, event kind)
/// coalesce into a single dispatch, and sends that fail for lack of
/// connectivity are parked in a bounded queue that is replayed when the
/// connectivity signal comes back. Every other failure ends as a log line.
///
/// Must be constructed inside a Tokio runtime; construction spawns the
/// connectivity watcher that drives queue replay.
#[derive(Clone)]
pub struct InteractionTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    transport: Arc<dyn InteractionTransport>,
    connectivity: watch::Receiver<bool>,
    config: TrackerConfig,
    pending: Mutex<HashMap<DispatchKey, JoinHandle<()>>>,
    queue: Mutex<VecDeque<QueuedEvent>>,
    draining: AtomicBool,
}

impl InteractionTracker {
    /// Creates the tracker and subscribes to the connectivity signal.
    ///
    /// The subscription is established exactly once, here, for the lifetime
    /// of the tracker; each offline-to-online transition triggers one drain
    /// pass over the queued events.
    pub fn new(
        transport: Arc<dyn InteractionTransport>,
        connectivity: watch::Receiver<bool>,
        config: TrackerConfig,
    ) -> Self {
        let inner = Arc::new(TrackerInner {
            transport,
            connectivity,
            config,
            pending: Mutex::new(HashMap::new()),
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
        });

        TrackerInner::spawn_connectivity_watcher(&inner);

        Self { inner }
    }

    /// Records a user action (fire and forget).
    ///
    /// Fields arrive as untrusted strings from the view layer; anything
    /// malformed is logged and dropped before a timer or queue slot exists
    /// for it.
    pub fn track(&self, item_id: &str, item_kind: &str, event_kind: &str) {
        let event = match InteractionEvent::parse(item_id, item_kind, event_kind) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(item_id = %item_id, error = %e, "Dropping invalid interaction");
                return;
            }
        };

        self.schedule(event);
    }

    /// Records that the user opened an item's detail view.
    pub fn track_view(&self, item_id: &str, item_kind: &str) {
        self.track(item_id, item_kind, "view");
    }

    /// Records that the user clicked an item card.
    pub fn track_click(&self, item_id: &str, item_kind: &str) {
        self.track(item_id, item_kind, "click");
    }

    /// Records that an item surfaced in the user's search results.
    pub fn track_search(&self, item_id: &str, item_kind: &str) {
        self.track(item_id, item_kind, "search");
    }

    /// Number of interactions currently parked for offline replay.
    pub fn queued_len(&self) -> usize {
        self.inner.queue.lock().unwrap().len()
    }

    /// Cancels every pending dispatch timer without firing it.
    ///
    /// For application teardown. In-flight sends, the offline queue and a
    /// running drain pass are left alone.
    pub fn cleanup(&self) {
        let mut pending = self.inner.pending.lock().unwrap();
        for (_, task) in pending.drain() {
            task.abort();
        }
    }

    /// Schedules a dispatch after the debounce window, superseding any
    /// pending dispatch for the same key.
    fn schedule(&self, event: InteractionEvent) {
        let key = (event.item_id, event.interaction_type);

        let task = tokio::spawn({
            let inner = Arc::clone(&self.inner);
            async move {
                tokio::time::sleep(inner.config.debounce).await;
                // Leaving the map and delivering must happen in this order:
                // a dispatch still in the map can be superseded and aborted,
                // one that has left it is committed to sending.
                inner.pending.lock().unwrap().remove(&key);
                TrackerInner::deliver(&inner, event).await;
            }
        });

        let mut pending = self.inner.pending.lock().unwrap();
        if let Some(superseded) = pending.insert(key, task) {
            superseded.abort();
        }
    }
}

impl TrackerInner {
    fn spawn_connectivity_watcher(inner: &Arc<Self>) {
        let weak = Arc::downgrade(inner);
        let mut rx = inner.connectivity.clone();

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if !*rx.borrow_and_update() {
                    continue;
                }
                match weak.upgrade() {
                    Some(inner) => Self::drain(&inner).await,
                    None => break,
                }
            }
        });
    }

    /// Sends one event and classifies the outcome.
    ///
    /// Returns true when the event was re-queued for offline replay.
    async fn deliver(inner: &Arc<Self>, event: InteractionEvent) -> bool {
        match inner.transport.send(event.clone()).await {
            Ok(ack) if ack.success => {
                tracing::debug!(
                    item_id = %event.item_id,
                    item = %event.item_type,
                    interaction = %event.interaction_type,
                    "Interaction tracked"
                );
                false
            }
            Ok(ack) => {
                // Logical rejection: the backend saw the event and refused
                // it, so a retry would be refused again.
                tracing::warn!(
                    item_id = %event.item_id,
                    message = ack.message.as_deref().unwrap_or(""),
                    detail = ack.error.as_deref().unwrap_or(""),
                    "Interaction rejected by backend"
                );
                false
            }
            Err(e) if !*inner.connectivity.borrow() || e.is_connectivity() => {
                Self::enqueue(inner, event);
                true
            }
            Err(e) => {
                tracing::error!(item_id = %event.item_id, error = %e, "Interaction send failed");
                false
            }
        }
    }

    /// Parks an event for replay, evicting the oldest at capacity.
    fn enqueue(inner: &Arc<Self>, event: InteractionEvent) {
        let mut queue = inner.queue.lock().unwrap();

        if queue.len() >= inner.config.queue_capacity {
            if let Some(evicted) = queue.pop_front() {
                tracing::warn!(
                    item_id = %evicted.event.item_id,
                    "Offline queue full, evicting oldest interaction"
                );
            }
        }

        queue.push_back(QueuedEvent {
            event,
            queued_at: Utc::now(),
        });

        tracing::debug!(queued = queue.len(), "Interaction queued for replay");
    }

    /// Replays queued events in arrival order, one drain pass at a time.
    ///
    /// A renewed connectivity failure re-queues the event and ends the pass;
    /// the next restoration picks the queue back up.
    async fn drain(inner: &Arc<Self>) {
        if inner.draining.swap(true, Ordering::SeqCst) {
            return;
        }

        let backlog = inner.queue.lock().unwrap().len();
        if backlog > 0 {
            tracing::debug!(backlog, "Connectivity restored, replaying queued interactions");
        }

        loop {
            let next = inner.queue.lock().unwrap().pop_front();
            let Some(queued) = next else { break };

            let requeued = Self::deliver(inner, queued.event).await;
            if requeued {
                break;
            }

            tokio::time::sleep(inner.config.drain_spacing).await;
        }

        inner.draining.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::super::transport::MockInteractionTransport;
    use super::*;
    use crate::connectivity::ConnectivityMonitor;
    use crate::error::{ClientError, ClientResult};
    use crate::models::InteractionAck;

    const ITEM: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Accept,
        Reject,
        Offline,
        ServerError,
    }

    /// Records every delivery attempt and fails on demand.
    struct FakeTransport {
        attempts: Mutex<Vec<InteractionEvent>>,
        attempted_at: Mutex<Vec<Instant>>,
        mode: Mutex<Mode>,
    }

    impl FakeTransport {
        fn new(mode: Mode) -> Arc<Self> {
            Arc::new(Self {
                attempts: Mutex::new(Vec::new()),
                attempted_at: Mutex::new(Vec::new()),
                mode: Mutex::new(mode),
            })
        }

        fn set_mode(&self, mode: Mode) {
            *self.mode.lock().unwrap() = mode;
        }

        fn attempts(&self) -> Vec<InteractionEvent> {
            self.attempts.lock().unwrap().clone()
        }

        fn attempted_at(&self) -> Vec<Instant> {
            self.attempted_at.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl InteractionTransport for FakeTransport {
        async fn send(&self, event: InteractionEvent) -> ClientResult<InteractionAck> {
            self.attempts.lock().unwrap().push(event);
            self.attempted_at.lock().unwrap().push(Instant::now());

            match *self.mode.lock().unwrap() {
                Mode::Accept => Ok(InteractionAck {
                    success: true,
                    ..Default::default()
                }),
                Mode::Reject => Ok(InteractionAck {
                    success: false,
                    message: Some("duplicate interaction".to_string()),
                    error: None,
                }),
                Mode::Offline => Err(ClientError::Offline("connection refused".to_string())),
                Mode::ServerError => {
                    Err(ClientError::Api("API returned status 500: boom".to_string()))
                }
            }
        }
    }

    fn tracker_with(
        transport: Arc<dyn InteractionTransport>,
    ) -> (InteractionTracker, ConnectivityMonitor) {
        let monitor = ConnectivityMonitor::new();
        let tracker =
            InteractionTracker::new(transport, monitor.subscribe(), TrackerConfig::default());
        (tracker, monitor)
    }

    async fn past_debounce() {
        tokio::time::sleep(Duration::from_millis(1100)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_item_id_sends_nothing() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track("not-a-uuid", "movie", "view");
        tracker.track("", "movie", "view");
        tracker.track("3fa85f6457174562b3fc2c963f66afa6", "movie", "view");
        past_debounce().await;

        assert!(transport.attempts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_kinds_send_nothing() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "album", "view");
        tracker.track(ITEM, "movie", "hover");
        past_debounce().await;

        assert!(transport.attempts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_repeats_coalesce_to_last_payload() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        // Same coalescing key throughout; the item kind on the final call
        // differs, proving the dispatched payload is the last one.
        for _ in 0..4 {
            tracker.track(ITEM, "movie", "view");
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tracker.track(ITEM, "book", "view");
        past_debounce().await;

        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].item_type, crate::models::ItemKind::Book);
        assert_eq!(attempts[0].interaction_type, crate::models::EventKind::View);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_window_resets_on_repeat() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "movie", "view");
        tokio::time::sleep(Duration::from_millis(900)).await;
        tracker.track(ITEM, "movie", "view");
        tokio::time::sleep(Duration::from_millis(900)).await;

        // Neither window has elapsed uninterrupted yet
        assert!(transport.attempts().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(transport.attempts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_dispatch_independently() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        let other = "9b2f1c0e-8d4a-4f6b-9c3d-5e7a1b2c3d4e";
        tracker.track(ITEM, "movie", "view");
        tracker.track(ITEM, "movie", "click");
        tracker.track(other, "book", "view");
        tracker.track(other, "book", "view");
        past_debounce().await;

        // Three keys, four calls
        assert_eq!(transport.attempts().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_cancels_pending_dispatches() {
        let transport = FakeTransport::new(Mode::Accept);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "movie", "view");
        tracker.cleanup();
        past_debounce().await;
        past_debounce().await;

        assert!(transport.attempts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_offline_failure_queues_event() {
        let transport = FakeTransport::new(Mode::Offline);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "movie", "view");
        past_debounce().await;

        assert_eq!(transport.attempts().len(), 1);
        assert_eq!(tracker.queued_len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_is_discarded_not_queued() {
        let transport = FakeTransport::new(Mode::ServerError);
        let (tracker, monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "movie", "view");
        past_debounce().await;

        assert_eq!(transport.attempts().len(), 1);
        assert_eq!(tracker.queued_len(), 0);

        // Nothing to replay either
        monitor.set_offline();
        monitor.set_online();
        past_debounce().await;
        assert_eq!(transport.attempts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_is_discarded_not_queued() {
        let transport = FakeTransport::new(Mode::Reject);
        let (tracker, _monitor) = tracker_with(transport.clone());

        tracker.track(ITEM, "movie", "view");
        past_debounce().await;

        assert_eq!(transport.attempts().len(), 1);
        assert_eq!(tracker.queued_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logical_rejection_is_not_retried() {
        let mut mock = MockInteractionTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Ok(InteractionAck {
                success: false,
                message: Some("item not found".to_string()),
                error: Some("unknown item".to_string()),
            })
        });

        let (tracker, monitor) = tracker_with(Arc::new(mock));

        tracker.track(ITEM, "movie", "view");
        past_debounce().await;
        assert_eq!(tracker.queued_len(), 0);

        // A connectivity cycle must not resend a rejected event; the mock
        // panics on a second call.
        monitor.set_offline();
        monitor.set_online();
        past_debounce().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_evicts_oldest_at_capacity() {
        let transport = FakeTransport::new(Mode::Offline);
        let (tracker, monitor) = tracker_with(transport.clone());

        let ids: Vec<String> = (0..51)
            .map(|i| format!("3fa85f64-5717-4562-b3fc-2c963f66{:04x}", i))
            .collect();

        for id in &ids {
            tracker.track(id, "movie", "view");
            past_debounce().await;
        }

        assert_eq!(transport.attempts().len(), 51);
        assert_eq!(tracker.queued_len(), 50);

        transport.set_mode(Mode::Accept);
        monitor.set_offline();
        monitor.set_online();
        // 50 replays at 100ms spacing
        tokio::time::sleep(Duration::from_secs(10)).await;

        // Events #2..=#51 replayed in arrival order; #1 was evicted
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 101);
        assert_eq!(tracker.queued_len(), 0);

        let drained: Vec<String> = attempts[51..]
            .iter()
            .map(|e| e.item_id.to_string())
            .collect();
        assert_eq!(drained.first().unwrap(), &ids[1]);
        assert_eq!(drained.last().unwrap(), &ids[50]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_preserves_order_and_spacing() {
        let transport = FakeTransport::new(Mode::Offline);
        let (tracker, monitor) = tracker_with(transport.clone());

        let ids = [
            "11111111-1111-4111-8111-111111111111",
            "22222222-2222-4222-8222-222222222222",
            "33333333-3333-4333-8333-333333333333",
        ];
        for id in ids {
            tracker.track(id, "book", "click");
            past_debounce().await;
        }
        assert_eq!(tracker.queued_len(), 3);

        transport.set_mode(Mode::Accept);
        monitor.set_offline();
        monitor.set_online();
        past_debounce().await;

        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 6);
        assert_eq!(tracker.queued_len(), 0);

        let drained: Vec<String> = attempts[3..].iter().map(|e| e.item_id.to_string()).collect();
        assert_eq!(drained, ids.map(String::from).to_vec());

        // Replayed sends are spaced by the configured interval
        let at = transport.attempted_at();
        for pair in at[3..].windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_stops_when_connectivity_drops_again() {
        let transport = FakeTransport::new(Mode::Offline);
        let (tracker, monitor) = tracker_with(transport.clone());

        let first = "11111111-1111-4111-8111-111111111111";
        let second = "22222222-2222-4222-8222-222222222222";
        for id in [first, second] {
            tracker.track(id, "movie", "view");
            past_debounce().await;
        }
        assert_eq!(tracker.queued_len(), 2);

        // Still unreachable: the drain re-queues the popped event and stops
        // instead of spinning through the backlog.
        monitor.set_offline();
        monitor.set_online();
        past_debounce().await;

        assert_eq!(transport.attempts().len(), 3);
        assert_eq!(tracker.queued_len(), 2);

        transport.set_mode(Mode::Accept);
        monitor.set_offline();
        monitor.set_online();
        past_debounce().await;

        // The re-queued event moved to the back of the line
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 5);
        assert_eq!(tracker.queued_len(), 0);
        assert_eq!(attempts[3].item_id.to_string(), second);
        assert_eq!(attempts[4].item_id.to_string(), first);
    }
}
