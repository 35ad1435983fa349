use tokio::sync::watch;

/// Process-wide connectivity signal
///
/// Wraps a watch channel carrying the current online state. Platform glue
/// (or a test) flips the state; consumers subscribe for transitions. The
/// monitor starts online.
pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn set_online(&self) {
        // send_replace keeps working even with no active subscribers
        self.tx.send_replace(true);
    }

    pub fn set_offline(&self) {
        self.tx.send_replace(false);
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_online() {
        let monitor = ConnectivityMonitor::new();
        assert!(monitor.is_online());
        assert!(*monitor.subscribe().borrow());
    }

    #[tokio::test]
    async fn test_transitions_are_observed() {
        let monitor = ConnectivityMonitor::new();
        let mut rx = monitor.subscribe();

        monitor.set_offline();
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());

        monitor.set_online();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
    }
}
