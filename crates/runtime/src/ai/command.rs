//! Messages delivered to an actor's AI.
//!
//! Everything that changes an actor's threat table or intention from outside
//! its own think cycle arrives as an [`AiCommand`] on the actor's inbox, so
//! the owning worker stays the only writer.

use std::time::Duration;

use combat_core::{ActorId, Intention};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiCommand {
    /// `attacker` hit the actor for `damage`.
    Attacked { attacker: ActorId, damage: i64 },
    /// A faction member asks the actor to fight `target` with at least `hate`.
    Aggression { target: ActorId, hate: i64 },
    /// Accumulate hate without a direct intention change.
    AddHate { target: ActorId, hate: i64 },
    /// A minion (or the leader itself) rallies the leader's group.
    Assist { caller: ActorId, target: ActorId },
    /// Drop the threat entry for `target` (death, disconnect).
    Forget { target: ActorId },
    SetIntention(Intention),
    /// Movement toward the current MOVE_TO destination finished.
    Arrived,
    Afraid { effector: ActorId, duration: Duration },
    FearEnded,
    Died,
    MinionJoined { minion: ActorId },
    MinionDied { minion: ActorId },
}

impl AiCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Attacked { .. } => "attacked",
            Self::Aggression { .. } => "aggression",
            Self::AddHate { .. } => "add_hate",
            Self::Assist { .. } => "assist",
            Self::Forget { .. } => "forget",
            Self::SetIntention(_) => "set_intention",
            Self::Arrived => "arrived",
            Self::Afraid { .. } => "afraid",
            Self::FearEnded => "fear_ended",
            Self::Died => "died",
            Self::MinionJoined { .. } => "minion_joined",
            Self::MinionDied { .. } => "minion_died",
        }
    }
}
