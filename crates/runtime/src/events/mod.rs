//! Topic-based event bus for runtime events.
//!
//! Workers publish what changed in an actor's AI after every step, and
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, DiagnosticEvent, IntentionEvent};
