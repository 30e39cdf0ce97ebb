//! Combat AI for attackable NPCs.
//!
//! This crate holds the per-actor decision logic and the tokio runtime that
//! schedules it. Consumers embed [`AiRuntime`] to give actors of a world a
//! brain, talk to them through [`AiHandle`], and subscribe to what they do.
//! [`Brain`] can also be driven directly, one think cycle at a time.
//!
//! Modules are organized by responsibility:
//! - [`ai`] hosts the brain and every behavior of the decision logic
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] provides the default RNG and clock
//! - `workers` keeps the per-actor tasks internal to the crate
pub mod ai;
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use ai::{
    ActorDirectory, AiCommand, Brain, CastAttempt, SkipReason, Spawn, ThinkError, ThinkOutcome,
};
pub use api::{ActorRegistry, AiHandle, AiStatus, Result, RuntimeError};
pub use events::{CombatEvent, DiagnosticEvent, Event, EventBus, IntentionEvent, Topic};
pub use oracle::{SharedRng, TickClock};
pub use runtime::{ActorSpawn, AiRuntime, AiRuntimeBuilder, RuntimeConfig};
