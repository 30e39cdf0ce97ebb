//! RNG oracle for probability gates.
//!
//! All rolls of every actor go through one shared source so a seeded runtime
//! replays the same decisions.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Uniform integer source shared by all actors.
pub trait RngOracle: Send + Sync {
    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&self, bound: u32) -> u32;

    /// Uniform value in `[min, max]` inclusive.
    fn between(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.below(max - min + 1)
    }

    /// Percent roll: true with probability `percent`/100.
    fn chance(&self, percent: u32) -> bool {
        self.below(100) < percent
    }

    fn coin(&self) -> bool {
        self.below(2) == 0
    }
}

/// Deterministic source for tests and replays.
///
/// Pops queued values first, then repeats `fallback`. Every value is clamped
/// into the requested range, so a fallback of 0 passes every "roll below"
/// gate and a large fallback fails them.
#[derive(Debug)]
pub struct ScriptedRng {
    queue: Mutex<VecDeque<u32>>,
    fallback: u32,
}

impl ScriptedRng {
    pub fn constant(value: u32) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: value,
        }
    }

    pub fn with_sequence(values: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            queue: Mutex::new(values.into_iter().collect()),
            fallback,
        }
    }

    pub fn push(&self, value: u32) {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(value);
    }
}

impl RngOracle for ScriptedRng {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let next = self
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(self.fallback);
        next.min(bound - 1)
    }
}
