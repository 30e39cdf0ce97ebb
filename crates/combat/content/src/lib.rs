//! Data-driven content for the attackable AI.
//!
//! This crate provides loaders for RON/TOML data files:
//! - AI tuning (`config.toml`, TOML)
//! - Skill catalogs (`skills.ron`)
//! - Actor templates with their skill books (`templates.ron`)
//! - Sandbox scenarios used by the simulator (`scenarios/*.ron`)
//!
//! Flag sets and enums are written as lowercase names in data files and
//! resolved against the combat-core types while loading, so a typo fails the
//! load instead of silently dropping a capability.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, NpcSpec, PlayerSpec, ScenarioLoader, ScenarioSpec,
    ScriptedAction, ScriptedEvent, SkillCatalog, SkillLoader, SkillSpec, TemplateLoader,
    TemplateSpec,
};
