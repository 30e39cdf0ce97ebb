use std::time::Duration;

use combat_core::{Clock, Tick};
use tokio::time::Instant;

/// Game ticks derived from tokio time since the runtime was built.
///
/// Reads tokio's clock, so paused-time tests advance it deterministically.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    start: Instant,
    tick: Duration,
}

impl TickClock {
    pub fn new(tick: Duration) -> Self {
        Self {
            start: Instant::now(),
            tick,
        }
    }
}

impl Clock for TickClock {
    fn now(&self) -> Tick {
        let tick = self.tick.as_nanos().max(1);
        (self.start.elapsed().as_nanos() / tick) as Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn counts_whole_ticks() {
        let clock = TickClock::new(Duration::from_millis(100));
        assert_eq!(clock.now(), 0);

        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(clock.now(), 2);
    }
}
