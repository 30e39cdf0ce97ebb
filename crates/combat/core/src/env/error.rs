//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::ActorId;

/// Errors raised by world implementations when registering or editing
/// characters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("character {0} is already present in the world")]
    DuplicateCharacter(ActorId),

    #[error("character {0} is not present in the world")]
    UnknownCharacter(ActorId),
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateCharacter(_) => ErrorSeverity::Validation,
            Self::UnknownCharacter(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCharacter(_) => "ORACLE_DUPLICATE_CHARACTER",
            Self::UnknownCharacter(_) => "ORACLE_UNKNOWN_CHARACTER",
        }
    }
}
