//! AI tuning loader.

use std::path::Path;

use combat_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AiConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load AI configuration from a TOML file.
    ///
    /// Missing keys keep their defaults, so a file only lists what it tunes.
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.random_walk_rate == 0 || config.forget_rate == 0 {
            anyhow::bail!("random_walk_rate and forget_rate must be positive");
        }
        Ok(config)
    }
}
