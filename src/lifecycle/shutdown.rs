//! Shutdown coordination.

use tokio::sync::broadcast;

/// One-shot shutdown coordinator.
///
/// Long-running tasks obtain a [`ShutdownListener`] before they start; the
/// signal path calls [`trigger`](Shutdown::trigger) once. Dropping the
/// coordinator releases waiting listeners too, so a task never outlives the
/// lifecycle that owns it.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a listener for a task to block on.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Request shutdown. Triggering with no live listeners is harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Task-side handle that resolves once shutdown is requested.
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
}

impl ShutdownListener {
    /// Wait until shutdown is triggered or the coordinator is dropped.
    ///
    /// An orphaned listener has nothing left to serve for, so a dropped
    /// coordinator counts as a request.
    pub async fn wait(&mut self) {
        let _ = self.rx.recv().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_all_listeners() {
        let shutdown = Shutdown::new();
        let mut first = shutdown.listener();
        let mut second = shutdown.listener();
        assert_eq!(shutdown.listener_count(), 2);

        shutdown.trigger();

        first.wait().await;
        second.wait().await;
    }

    #[tokio::test]
    async fn trigger_without_listeners_is_harmless() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        // A listener arriving afterwards only sees later triggers.
        let mut late = shutdown.listener();
        shutdown.trigger();
        late.wait().await;
    }

    #[tokio::test]
    async fn dropped_coordinator_releases_listeners() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.listener();
        drop(shutdown);

        listener.wait().await;
    }
}
