//! Content factory for loading every AI data file from one directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use combat_core::{ActorTemplate, AiConfig};

use crate::loaders::{
    ConfigLoader, LoadResult, ScenarioLoader, ScenarioSpec, SkillCatalog, SkillLoader,
    TemplateLoader,
};

/// Content factory that loads all AI content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── templates.ron
/// └── scenarios/
///     ├── ambush.ron
///     └── raid.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load AI tuning from `config.toml`. A missing file yields the defaults.
    pub fn load_config(&self) -> LoadResult<AiConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AiConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load templates from `templates.ron`, keyed by name.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Skill catalog (load via `load_skills()`)
    pub fn load_templates(
        &self,
        catalog: &SkillCatalog,
    ) -> LoadResult<HashMap<String, Arc<ActorTemplate>>> {
        let path = self.data_dir.join("templates.ron");
        let templates = TemplateLoader::load(&path, catalog)?;
        Ok(templates
            .into_iter()
            .map(|t| (t.name.clone(), Arc::new(t)))
            .collect())
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
