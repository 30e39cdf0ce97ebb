//! Actor template loader.
//!
//! Templates reference skills by id; the catalog from
//! [`SkillLoader`](crate::loaders::SkillLoader) must be loaded first.

use std::path::Path;

use combat_core::{
    ActorTemplate, Archetype, Capabilities, FactionId, Role, SkillBook, SkillId, SkillScope,
};
use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::loaders::{LoadResult, SkillCatalog, parse_flags, read_file};

/// Template entry as written in `templates.ron`.
#[derive(Clone, Debug, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub factions: Vec<u16>,
    #[serde(default)]
    pub faction_range: i32,
    #[serde(default)]
    pub aggro_range: i32,
    #[serde(default = "default_attack_range")]
    pub physical_attack_range: i32,
    #[serde(default)]
    pub min_skill_chance: u32,
    #[serde(default)]
    pub max_skill_chance: u32,
    #[serde(default)]
    pub short_range_chance: u32,
    #[serde(default)]
    pub long_range_chance: u32,
    /// `(scope, skill id)` pairs, e.g. `("SHORT_RANGE", 1002)`.
    #[serde(default)]
    pub skills: Vec<(String, u32)>,
}

fn default_attack_range() -> i32 {
    40
}

impl TemplateSpec {
    pub fn resolve(&self, catalog: &SkillCatalog) -> LoadResult<ActorTemplate> {
        let role: Role = self.role.parse().map_err(|_| {
            anyhow::anyhow!("Unknown role '{}' for template '{}'", self.role, self.name)
        })?;
        let archetype = match &self.archetype {
            Some(name) => name.parse::<Archetype>().map_err(|_| {
                anyhow::anyhow!("Unknown archetype '{}' for template '{}'", name, self.name)
            })?,
            None => Archetype::default(),
        };
        let capabilities: Capabilities =
            parse_flags(&self.capabilities, "capability", &self.name)?;

        if self.min_skill_chance > self.max_skill_chance {
            anyhow::bail!(
                "Template '{}' has min_skill_chance {} above max_skill_chance {}",
                self.name,
                self.min_skill_chance,
                self.max_skill_chance
            );
        }

        let mut skills = SkillBook::new();
        for (scope_name, id) in &self.skills {
            let scope: SkillScope = scope_name.parse().map_err(|_| {
                let known: Vec<String> = SkillScope::iter().map(|s| s.to_string()).collect();
                anyhow::anyhow!(
                    "Unknown skill scope '{}' for template '{}' (expected one of: {})",
                    scope_name,
                    self.name,
                    known.join(", ")
                )
            })?;
            let skill = catalog.get(&SkillId(*id)).ok_or_else(|| {
                anyhow::anyhow!("Template '{}' references unknown skill {}", self.name, id)
            })?;
            skills.insert(scope, skill.clone());
        }

        let mut template = ActorTemplate::new(self.name.clone(), role)
            .with_capabilities(capabilities)
            .with_factions(
                self.factions.iter().copied().map(FactionId).collect(),
                self.faction_range,
            )
            .with_aggro_range(self.aggro_range)
            .with_skills(skills);
        template.archetype = archetype;
        template.physical_attack_range = self.physical_attack_range;
        template.min_skill_chance = self.min_skill_chance;
        template.max_skill_chance = self.max_skill_chance;
        template.short_range_chance = self.short_range_chance;
        template.long_range_chance = self.long_range_chance;
        Ok(template)
    }
}

/// Loader for actor templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load templates from a RON file, resolving skill ids against `catalog`.
    ///
    /// RON format: Vec<TemplateSpec>
    pub fn load(path: &Path, catalog: &SkillCatalog) -> LoadResult<Vec<ActorTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &SkillCatalog) -> LoadResult<Vec<ActorTemplate>> {
        let specs: Vec<TemplateSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template RON: {}", e))?;

        let mut templates: Vec<ActorTemplate> = Vec::with_capacity(specs.len());
        for spec in &specs {
            if templates.iter().any(|t| t.name == spec.name) {
                anyhow::bail!("Duplicate template name '{}'", spec.name);
            }
            templates.push(spec.resolve(catalog)?);
        }
        Ok(templates)
    }
}
