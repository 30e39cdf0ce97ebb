//! Orders the AI issues to the world.
//!
//! Each primitive enforces its own preconditions (range, resources, disable
//! flags) and silently does nothing when they fail. The AI pre-checks what it
//! can, but the primitive has the final word.

use crate::skill::Skill;
use crate::state::{ActorId, Position};

/// Client-visible abnormal effect toggled by the AI.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualEffect {
    TurnFlee,
}

pub trait CombatPrimitives: Send + Sync {
    fn attack(&self, actor: ActorId, target: ActorId);

    /// Casts `skill`. Self and party skills pass the caster as `target`.
    fn cast(&self, actor: ActorId, skill: &Skill, target: ActorId);

    fn move_to(&self, actor: ActorId, destination: Position);

    /// Approaches `target` until within `offset`.
    fn move_to_pawn(&self, actor: ActorId, target: ActorId, offset: i32);

    fn stop_moving(&self, actor: ActorId);

    fn set_running(&self, actor: ActorId, running: bool);

    /// Walks back to the spawn point.
    fn return_home(&self, actor: ActorId);

    /// Teleports `target` to the nearest town and tells it why.
    fn evict_to_town(&self, target: ActorId, notice: &str);

    fn set_visual_effect(&self, actor: ActorId, effect: VisualEffect, enabled: bool);
}
