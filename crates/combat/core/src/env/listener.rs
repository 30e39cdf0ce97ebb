use crate::state::ActorId;

/// External listeners notified by faction assist.
pub trait AiListener: Send + Sync {
    /// Called before `helper` is told to attack `target`. Returning false
    /// vetoes the call for help for this helper.
    fn on_aggression(&self, helper: ActorId, target: ActorId, hate: i64) -> bool;

    /// Scripted "faction call" hook. Fire and forget.
    fn on_faction_call(&self, helper: ActorId, caller: ActorId, target: ActorId);
}

/// Listener that allows everything and ignores calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl AiListener for NoopListener {
    fn on_aggression(&self, _helper: ActorId, _target: ActorId, _hate: i64) -> bool {
        true
    }

    fn on_faction_call(&self, _helper: ActorId, _caller: ActorId, _target: ActorId) {}
}
