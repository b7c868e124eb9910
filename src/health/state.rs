//! Process lifecycle state machine.
//!
//! # States
//! ```text
//! Starting → Listening → Ready ⇄ Degraded
//! any state → Stopping (terminal)
//! ```
//!
//! # Design Decisions
//! - Stored in a single AtomicU8 so handlers can read and update it
//!   without locks
//! - Readiness transitions are driven by completed health evaluations,
//!   not by a background task
//! - Stopping is sticky: no transition leaves it

use std::sync::atomic::{AtomicU8, Ordering};

use crate::health::report::OverallStatus;

/// Lifecycle phase.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Supervisor is provisioning; the listener is not bound yet.
    Starting = 0,
    /// Listener bound, no health evaluation has completed yet.
    Listening = 1,
    /// Last health evaluation reported ok.
    Ready = 2,
    /// Last health evaluation reported degraded or unhealthy.
    Degraded = 3,
    /// Termination signal received.
    Stopping = 4,
}

impl From<u8> for Phase {
    fn from(val: u8) -> Self {
        match val {
            1 => Phase::Listening,
            2 => Phase::Ready,
            3 => Phase::Degraded,
            4 => Phase::Stopping,
            _ => Phase::Starting,
        }
    }
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Starting => "starting",
            Phase::Listening => "listening",
            Phase::Ready => "ready",
            Phase::Degraded => "degraded",
            Phase::Stopping => "stopping",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared lifecycle state for one server process.
#[derive(Debug)]
pub struct Lifecycle {
    phase: AtomicU8,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from(self.phase.load(Ordering::Relaxed))
    }

    /// Record that the listener is bound and accepting connections.
    ///
    /// Only valid from `Starting`; returns whether the transition happened.
    pub fn mark_listening(&self) -> bool {
        let moved = self
            .phase
            .compare_exchange(
                Phase::Starting as u8,
                Phase::Listening as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok();
        if moved {
            tracing::info!(phase = %Phase::Listening, "Lifecycle transition");
        }
        moved
    }

    /// Fold a completed health evaluation into the lifecycle.
    ///
    /// Ignored before the listener is up and after stopping began.
    pub fn record_evaluation(&self, status: OverallStatus) {
        let target = match status {
            OverallStatus::Ok => Phase::Ready,
            OverallStatus::Degraded | OverallStatus::Unhealthy => Phase::Degraded,
        };
        let mut current = self.phase.load(Ordering::Relaxed);
        loop {
            match Phase::from(current) {
                Phase::Listening | Phase::Ready | Phase::Degraded => {}
                Phase::Starting | Phase::Stopping => return,
            }
            if current == target as u8 {
                return;
            }
            match self.phase.compare_exchange(
                current,
                target as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    tracing::info!(from = %Phase::from(current), to = %target, "Lifecycle transition");
                    return;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Enter the terminal stopping phase.
    pub fn mark_stopping(&self) {
        let previous = self.phase.swap(Phase::Stopping as u8, Ordering::Relaxed);
        if previous != Phase::Stopping as u8 {
            tracing::info!(from = %Phase::from(previous), to = %Phase::Stopping, "Lifecycle transition");
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
