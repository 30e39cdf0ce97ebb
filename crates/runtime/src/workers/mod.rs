//! Worker tasks that back the runtime orchestration.
//!
//! Every AI-driven actor gets one [`ActorWorker`] that owns its brain and
//! runs its think and fear schedules.

mod actor;

use std::sync::Arc;

use combat_core::{AiConfig, AiEnv, AiListener, Clock, CombatPrimitives, RngOracle, WorldOracle};

use crate::ai::AiCommand;
use crate::api::ActorRegistry;
use crate::events::EventBus;

pub(crate) use actor::ActorWorker;

/// What travels on an actor's inbox.
#[derive(Debug)]
pub(crate) enum Envelope {
    Command(AiCommand),
    Shutdown,
}

/// Collaborators shared by every worker of a runtime.
pub(crate) struct Services {
    pub(crate) world: Arc<dyn WorldOracle>,
    pub(crate) combat: Arc<dyn CombatPrimitives>,
    pub(crate) rng: Arc<dyn RngOracle>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) listener: Arc<dyn AiListener>,
    pub(crate) config: AiConfig,
    pub(crate) registry: ActorRegistry,
    pub(crate) event_bus: EventBus,
}

impl Services {
    pub(crate) fn env(&self) -> AiEnv<'_> {
        AiEnv::new(
            self.world.as_ref(),
            self.combat.as_ref(),
            self.rng.as_ref(),
            self.clock.as_ref(),
            self.listener.as_ref(),
            &self.config,
        )
    }
}
