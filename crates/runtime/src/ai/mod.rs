//! Decision logic of attackable NPCs.
//!
//! A [`Brain`] holds one actor's AI state. Each think cycle (and each inbox
//! command) builds a short-lived context over the brain and the world
//! snapshot of the actor; the behavior modules below hang their methods off
//! that context:
//!
//! - `intention`: transitions, entry effects and the CAST behavior
//! - `active`: aggro acquisition, forgetting, wandering and leader following
//! - `attack`: the combat decision tree
//! - `cast`: the skill selection engine
//! - `reconsider`: alternative target selection
//! - `immobilized`: fallback while rooted
//! - `faction`: calling nearby allies
//! - `fear`: the fear task
//! - `events`: inbox command handling and minion assist
//!
//! No behavior touches another actor's brain. Cross-actor effects go through
//! an [`ActorDirectory`].

mod active;
mod aggro;
mod attack;
mod brain;
mod cast;
mod command;
mod context;
mod directory;
mod error;
mod events;
mod faction;
mod fear;
mod immobilized;
mod intention;
mod reconsider;

#[cfg(test)]
pub(crate) mod testing;

pub use brain::{Brain, SkipReason, Spawn, ThinkOutcome};
pub use cast::CastAttempt;
pub use command::AiCommand;
pub use directory::ActorDirectory;
pub use error::ThinkError;
