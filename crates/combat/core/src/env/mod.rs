//! Traits describing the collaborators of the AI.
//!
//! The world query service, combat primitives, randomness, clock and listener
//! sink are all injected. The [`AiEnv`] aggregate bundles borrowed trait
//! objects so a think cycle can reach everything without process-wide
//! singletons.
mod clock;
mod combat;
mod error;
mod listener;
mod rng;
mod world;

pub use clock::{Clock, ManualClock};
pub use combat::{CombatPrimitives, VisualEffect};
pub use error::OracleError;
pub use listener::{AiListener, NoopListener};
pub use rng::{RngOracle, ScriptedRng};
pub use world::WorldOracle;

use crate::config::AiConfig;

/// Collaborators available to one think cycle.
#[derive(Clone, Copy)]
pub struct AiEnv<'a> {
    pub world: &'a dyn WorldOracle,
    pub combat: &'a dyn CombatPrimitives,
    pub rng: &'a dyn RngOracle,
    pub clock: &'a dyn Clock,
    pub listener: &'a dyn AiListener,
    pub config: &'a AiConfig,
}

impl<'a> AiEnv<'a> {
    pub fn new(
        world: &'a dyn WorldOracle,
        combat: &'a dyn CombatPrimitives,
        rng: &'a dyn RngOracle,
        clock: &'a dyn Clock,
        listener: &'a dyn AiListener,
        config: &'a AiConfig,
    ) -> Self {
        Self {
            world,
            combat,
            rng,
            clock,
            listener,
            config,
        }
    }
}

impl core::fmt::Debug for AiEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AiEnv")
            .field("now", &self.clock.now())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
