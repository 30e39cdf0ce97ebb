//! Event types for different topics.

use combat_core::{ActorId, IntentionKind, Tick};
use serde::{Deserialize, Serialize};

/// An actor's intention changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionEvent {
    pub actor: ActorId,
    pub from: IntentionKind,
    pub to: IntentionKind,
    pub tick: Tick,
}

/// Events related to who an actor is fighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The attack target was set, switched or dropped.
    TargetChanged {
        actor: ActorId,
        target: Option<ActorId>,
        tick: Tick,
    },

    FearStarted { actor: ActorId, tick: Tick },

    FearEnded { actor: ActorId, tick: Tick },
}

impl CombatEvent {
    pub fn actor(&self) -> ActorId {
        match self {
            Self::TargetChanged { actor, .. }
            | Self::FearStarted { actor, .. }
            | Self::FearEnded { actor, .. } => *actor,
        }
    }
}

/// Think cycles that did not complete normally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticEvent {
    /// The cycle returned an error.
    ThinkFailed {
        actor: ActorId,
        intention: IntentionKind,
        code: String,
        message: String,
    },

    /// The cycle panicked and was trapped by the worker.
    ThinkPanicked { actor: ActorId, message: String },
}
