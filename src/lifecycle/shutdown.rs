//! Shutdown coordination for the dev server.
//!
//! The stop request is a latched flag, not a one-shot message. A Ctrl+C that
//! lands while routes are still compiling is seen by a server that subscribes
//! afterwards.

use std::sync::Arc;

use tokio::sync::watch;

/// Handle that requests the dev server to stop.
///
/// Cloned into the signal task and the test harness; every clone flips the
/// same flag.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal for one server instance to await.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        // `send_replace` stores the flag even with no subscriber yet.
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`Shutdown`], handed to `HttpServer::run`.
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown is requested, or once every `Shutdown` handle
    /// has been dropped and nothing can request it any more.
    pub async fn triggered(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
