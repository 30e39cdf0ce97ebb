//! Data types and collaborator traits for attackable NPC combat AI.
//!
//! `combat-core` describes what an attackable knows about itself (templates,
//! skill books, threat tables, intentions) and what it may ask of the world
//! through the traits in [`env`]. It performs no I/O and spawns no tasks; the
//! `ai-runtime` crate drives the decision logic on top of these types.
pub mod config;
pub mod env;
pub mod error;
pub mod intention;
pub mod sandbox;
pub mod skill;
pub mod state;
pub mod template;
pub mod threat;

pub use config::AiConfig;
pub use env::{
    AiEnv, AiListener, Clock, CombatPrimitives, ManualClock, NoopListener, OracleError,
    RngOracle, ScriptedRng, VisualEffect, WorldOracle,
};
pub use error::{CombatError, ErrorSeverity};
pub use intention::{Intention, IntentionKind};
pub use sandbox::{InMemoryWorld, Order, Zone};
pub use skill::{EffectSet, Skill, SkillBook, SkillFlags, SkillId, SkillScope, TargetType};
pub use state::{
    ActiveEffect, ActiveEffects, ActorId, Character, CharacterKind, ClanId, Conditions, FactionId,
    InstanceId, Meter, NpcInfo, PlayerInfo, Position, Tick,
};
pub use template::{ActorTemplate, Archetype, Capabilities, Role};
pub use threat::{ThreatEntry, ThreatTable};
