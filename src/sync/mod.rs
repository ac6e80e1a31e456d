
use std::sync::Arc;

use tokio::sync::watch;

/// A [ShutdownToken] is shared by every long-running loop. Once cancelled it
/// can never be reset, and each loop is expected to observe it at its next
/// suspension point.
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownToken {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Returns true only for the call that actually
    /// flipped the token; every later call is a no-op.
    pub fn cancel(&self) -> bool {
        let cancelled = self.tx.send_if_modified(|value| {
            if *value {
                return false;
            }
            *value = true;
            true
        });
        if cancelled {
            log::debug!("Shutdown requested");
        }
        cancelled
    }

    /// Returns true if shutdown was requested
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once shutdown is requested. Resolves immediately if the
    /// token was already cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as this token, so this cannot fail.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
