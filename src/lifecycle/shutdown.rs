//! Shutdown coordination.

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Broadcasts a single stop request to the HTTP server.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Default for Shutdown {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }
}

impl Shutdown {
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop.
    pub fn trigger(&self) {
        match self.tx.send(()) {
            Ok(listeners) => tracing::info!(listeners, "Shutdown triggered"),
            Err(_) => tracing::debug!("Shutdown triggered with nothing listening"),
        }
    }

    /// Trigger once SIGINT or SIGTERM arrives.
    pub fn trigger_on_signal(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            signals::wait_for_signal().await;
            this.trigger();
        });
    }
}
