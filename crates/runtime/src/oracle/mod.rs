//! Runtime implementations of the `combat-core` randomness and time oracles.
//!
//! One [`SharedRng`] and one [`TickClock`] serve every actor of a runtime.
mod clock;
mod rng;

pub use clock::TickClock;
pub use rng::SharedRng;
