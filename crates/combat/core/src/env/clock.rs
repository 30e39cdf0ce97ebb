use std::sync::atomic::{AtomicU64, Ordering};

use crate::state::Tick;

/// Monotonic world clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Tick;
}

/// Clock advanced by hand, for tests and offline simulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    tick: AtomicU64,
}

impl ManualClock {
    pub fn at(tick: Tick) -> Self {
        Self {
            tick: AtomicU64::new(tick),
        }
    }

    pub fn advance(&self, ticks: Tick) {
        self.tick.fetch_add(ticks, Ordering::SeqCst);
    }

    pub fn set(&self, tick: Tick) {
        self.tick.store(tick, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.tick.load(Ordering::SeqCst)
    }
}
