//! Lightweight behavior tree library for per-tick NPC decisions.
//!
//! Trees are cheap to assemble, so callers usually build one per think cycle
//! over a context that borrows the actor's state for that cycle only.
//!
//! - **No delta time**: Every tick completes immediately
//! - **No Running state**: Nodes either succeed or fail instantly
//! - **Borrowing contexts**: Nodes carry a lifetime, so the context type does
//!   not have to be `'static`
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure (no Running state)
//! - Leaf nodes: [`Action`], [`Condition`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysFail`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Node};
pub use builder::{action, always_fail, condition, inverter, selector, sequence};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysFail, Inverter};
pub use leaf::{Action, Condition};
pub use status::Status;
