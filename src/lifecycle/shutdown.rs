//! Shutdown coordination for long-running loops.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Cheap to clone; every clone triggers the same signal.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a listener. Only triggers that happen after this call are seen.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to a loop.
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
}

impl ShutdownListener {
    /// Resolve once shutdown was triggered, or every `Shutdown` was dropped.
    pub async fn recv(&mut self) {
        match self.rx.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("Shutdown coordinator dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_listener() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        shutdown.clone().trigger();

        tokio::time::timeout(Duration::from_secs(1), listener.recv())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropped_coordinator_releases_listener() {
        let shutdown = Shutdown::new();
        let mut listener = shutdown.subscribe();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), listener.recv())
            .await
            .unwrap();
    }
}
