//! High-level goals an AI can hold.

use crate::skill::SkillId;
use crate::state::{ActorId, Position};

/// The single current goal of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intention {
    /// Not thinking. The think schedule is stopped.
    #[default]
    Idle,
    /// Looking for targets, wandering, following a leader.
    Active,
    Attack { target: ActorId },
    Cast { skill: SkillId, target: ActorId },
    MoveTo { destination: Position },
    Follow { target: ActorId },
}

/// Discriminant of [`Intention`] without its arguments.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentionKind {
    #[default]
    Idle,
    Active,
    Attack,
    Cast,
    MoveTo,
    Follow,
}

impl Intention {
    pub const fn kind(&self) -> IntentionKind {
        match self {
            Self::Idle => IntentionKind::Idle,
            Self::Active => IntentionKind::Active,
            Self::Attack { .. } => IntentionKind::Attack,
            Self::Cast { .. } => IntentionKind::Cast,
            Self::MoveTo { .. } => IntentionKind::MoveTo,
            Self::Follow { .. } => IntentionKind::Follow,
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Target of an attack, cast or follow.
    pub const fn target(&self) -> Option<ActorId> {
        match self {
            Self::Attack { target } | Self::Cast { target, .. } | Self::Follow { target } => {
                Some(*target)
            }
            _ => None,
        }
    }
}

impl IntentionKind {
    /// Idle or active: free to answer a call for help.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Idle | Self::Active)
    }
}
