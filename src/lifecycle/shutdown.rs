//! Graceful shutdown coordination.
//!
//! # Responsibilities
//! - Fan a single shutdown decision out to every interested task
//! - Drive the lifecycle machine into its terminal phase
//!
//! Subscribers get a broadcast receiver; triggering is idempotent.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::health::state::Lifecycle;

const SHUTDOWN_CHANNEL_CAPACITY: usize = 16;

/// Broadcasts the shutdown decision to all server tasks.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    lifecycle: Arc<Lifecycle>,
}

impl Shutdown {
    pub fn new(lifecycle: Arc<Lifecycle>) -> Self {
        let (tx, _) = broadcast::channel(SHUTDOWN_CHANNEL_CAPACITY);
        Self { tx, lifecycle }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Begin shutdown. Safe to call more than once.
    pub fn trigger(&self) {
        self.lifecycle.mark_stopping();
        // Err here means no live receivers remain
        let _ = self.tx.send(());
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
