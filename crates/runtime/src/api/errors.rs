//! Unified error types surfaced by the runtime API.
//!
//! Covers building the runtime, spawning and despawning actors, and talking
//! to their workers through handles.
use combat_core::ActorId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a world oracle to be configured before building")]
    MissingWorld,

    #[error("runtime requires combat primitives to be configured before building")]
    MissingCombat,

    #[error("actor {0} already has an AI worker")]
    DuplicateActor(ActorId),

    #[error("actor {0} is not present in the world")]
    ActorNotInWorld(ActorId),

    #[error("actor {0} has no AI worker")]
    UnknownActor(ActorId),

    #[error("AI worker command channel closed for actor {0}")]
    CommandChannelClosed(ActorId),

    #[error("AI worker status channel closed for actor {0}")]
    StatusChannelClosed(ActorId),

    #[error("AI worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
