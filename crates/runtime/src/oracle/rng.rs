use std::sync::{Mutex, PoisonError};

use combat_core::RngOracle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Process-wide uniform source shared by all workers.
#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<StdRng>,
}

impl SharedRng {
    /// Reproducible sequence for simulations and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl RngOracle for SharedRng {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..bound)
    }
}
