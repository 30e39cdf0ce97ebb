//! Skill catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{EffectSet, Skill, SkillFlags, SkillId, TargetType};
use serde::Deserialize;

use crate::loaders::{LoadResult, parse_flags, read_file};

/// Skills keyed by id.
pub type SkillCatalog = BTreeMap<SkillId, Skill>;

/// Skill entry as written in `skills.ron`.
///
/// Targets, flags and effects are lowercase names:
///
/// ```ron
/// (id: 4001, name: "Poison Cloud", target: "area", cast_range: 600,
///  affect_range: 200, mp_cost: 40, flags: ["continuous", "debuff", "magic"],
///  effects: ["damage_over_time"])
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct SkillSpec {
    pub id: u32,
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub cast_range: i32,
    #[serde(default)]
    pub affect_range: i32,
    #[serde(default)]
    pub mp_cost: u32,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
}

impl SkillSpec {
    pub fn resolve(&self) -> LoadResult<Skill> {
        let target: TargetType = self.target.parse().map_err(|_| {
            anyhow::anyhow!(
                "Unknown target type '{}' for skill '{}'",
                self.target,
                self.name
            )
        })?;
        let flags: SkillFlags = parse_flags(&self.flags, "skill flag", &self.name)?;
        let effects: EffectSet = parse_flags(&self.effects, "effect", &self.name)?;

        Ok(Skill::new(SkillId(self.id), self.name.clone(), target)
            .with_ranges(self.cast_range, self.affect_range)
            .with_mp_cost(self.mp_cost)
            .with_flags(flags)
            .with_effects(effects))
    }
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill catalog from a RON file.
    ///
    /// RON format: Vec<SkillSpec>
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let specs: Vec<SkillSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut catalog = SkillCatalog::new();
        for spec in &specs {
            let skill = spec.resolve()?;
            if catalog.insert(skill.id, skill).is_some() {
                anyhow::bail!("Duplicate skill id {} ('{}')", spec.id, spec.name);
            }
        }
        tracing::debug!(count = catalog.len(), "loaded skill catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        (id: 1, name: "Bolt", target: "one", cast_range: 600, mp_cost: 20,
         flags: ["magic"], effects: ["magical_attack"]),
        (id: 2, name: "Might", target: "caster", flags: ["continuous"]),
        (id: 3, name: "Quake", target: "aura", affect_range: 150, effects: ["damage", "stun"]),
    ]"#;

    #[test]
    fn resolves_names_into_flag_sets() {
        let catalog = SkillLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let bolt = &catalog[&SkillId(1)];
        assert_eq!(bolt.target, TargetType::One);
        assert!(bolt.is_magic());
        assert!(bolt.has_any(EffectSet::DAMAGE));

        let quake = &catalog[&SkillId(3)];
        assert!(quake.effects.contains(EffectSet::DAMAGE | EffectSet::STUN));
        assert!(catalog[&SkillId(2)].is_continuous());
    }

    #[test]
    fn unknown_effect_fails_the_load() {
        let err = SkillLoader::parse(r#"[(id: 1, name: "X", target: "one", effects: ["burn"])]"#)
            .unwrap_err();
        assert!(err.to_string().contains("burn"));
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let dupes = r#"[(id: 1, name: "A", target: "one"), (id: 1, name: "B", target: "one")]"#;
        assert!(SkillLoader::parse(dupes).is_err());
    }
}
