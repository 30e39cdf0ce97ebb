use combat_core::{ActorId, IntentionKind};

use super::AiCommand;

/// Lookup of the other AI-driven actors.
///
/// Faction and minion assist never touch another actor's state directly;
/// they read its published intention and post a command to its inbox.
pub trait ActorDirectory: Send + Sync {
    /// Last published intention of `id`, `None` when it is not AI-driven.
    fn intention_of(&self, id: ActorId) -> Option<IntentionKind>;

    /// Posts `command` to `to`. Returns false when the actor is gone.
    fn send(&self, to: ActorId, command: AiCommand) -> bool;
}
