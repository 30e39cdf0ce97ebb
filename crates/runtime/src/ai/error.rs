//! Failures of a single think cycle.

use combat_core::{ActorId, CombatError, ErrorSeverity, SkillId};

/// Why a think cycle ended early.
///
/// Think errors never leave [`Brain::think`](super::Brain::think): they are
/// logged with the actor and its intention, and the next tick starts fresh.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThinkError {
    #[error("actor {0} is not present in the world")]
    ActorMissing(ActorId),

    #[error("actor {actor} was told to cast skill {skill:?} it does not know")]
    UnknownSkill { actor: ActorId, skill: SkillId },

    #[error("think cycle panicked: {0}")]
    Panicked(String),
}

impl CombatError for ThinkError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorMissing(_) => ErrorSeverity::Recoverable,
            Self::UnknownSkill { .. } => ErrorSeverity::Validation,
            Self::Panicked(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorMissing(_) => "THINK_ACTOR_MISSING",
            Self::UnknownSkill { .. } => "THINK_UNKNOWN_SKILL",
            Self::Panicked(_) => "THINK_PANICKED",
        }
    }
}
