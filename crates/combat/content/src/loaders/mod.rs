//! Content loaders for reading AI data from files.

pub mod config;
pub mod factory;
pub mod scenario;
pub mod skills;
pub mod templates;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{NpcSpec, PlayerSpec, ScenarioLoader, ScenarioSpec, ScriptedAction, ScriptedEvent};
pub use skills::{SkillCatalog, SkillLoader, SkillSpec};
pub use templates::{TemplateLoader, TemplateSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Resolves lowercase flag names (`"no_random_walk"`) into a bitflags set.
pub(crate) fn parse_flags<F>(names: &[String], what: &str, owner: &str) -> LoadResult<F>
where
    F: bitflags::Flags + Copy,
{
    let mut flags = F::empty();
    for name in names {
        let flag = F::from_name(&name.to_ascii_uppercase()).ok_or_else(|| {
            anyhow::anyhow!("Unknown {} '{}' in '{}'", what, name, owner)
        })?;
        flags.insert(flag);
    }
    Ok(flags)
}
