//! Generation counter for cancelable loads.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof of which scene context an asynchronous load was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    side_key: String,
}

impl LoadTicket {
    /// Generation the load was started in
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Side the load was started for
    pub fn side_key(&self) -> &str {
        &self.side_key
    }
}

/// Monotonic generation counter with a liveness flag.
///
/// The owner bumps the generation whenever its scene context changes
/// (side switch, teardown). A continuation holding an older ticket must
/// discard its result instead of mutating the scene.
#[derive(Debug)]
pub struct Generation {
    current: AtomicU64,
    alive: AtomicBool,
}

impl Generation {
    /// Create a live counter at generation 0
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
            alive: AtomicBool::new(true),
        }
    }

    /// Current generation
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    /// Start a load for `side_key` in the current generation
    pub fn begin(&self, side_key: impl Into<String>) -> LoadTicket {
        LoadTicket {
            generation: self.current(),
            side_key: side_key.into(),
        }
    }

    /// Invalidate every outstanding ticket
    ///
    /// Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Invalidate every ticket and refuse all future ones
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);
        self.invalidate();
    }

    /// Whether the owner is still alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Whether a continuation may still apply its result to `active_side`
    pub fn is_current(&self, ticket: &LoadTicket, active_side: &str) -> bool {
        self.is_alive() && ticket.generation == self.current() && ticket.side_key == active_side
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::new()
    }
}
