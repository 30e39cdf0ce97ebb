//! Per-template grouping of skills by AI scope.

use std::collections::HashMap;

use super::{Skill, SkillId};

/// Why an AI may consider a skill, independent of what the skill does.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SkillScope {
    Buff,
    Heal,
    Res,
    ShortRange,
    LongRange,
    Suicide,
    Immobilize,
    /// Cancel-of-target style crowd control used by rooted actors.
    Cot,
    Debuff,
    Negative,
    Universal,
    Attack,
    /// Every skill the template knows.
    General,
}

/// Read-only skill groups of one actor template.
///
/// Inserting a skill under any scope also registers it under
/// [`SkillScope::General`], once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillBook {
    scopes: HashMap<SkillScope, Vec<Skill>>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scope: SkillScope, skill: Skill) {
        if scope != SkillScope::General {
            let general = self.scopes.entry(SkillScope::General).or_default();
            if !general.iter().any(|s| s.id == skill.id) {
                general.push(skill.clone());
            }
        }
        let group = self.scopes.entry(scope).or_default();
        if !group.iter().any(|s| s.id == skill.id) {
            group.push(skill);
        }
    }

    /// Builder form of [`SkillBook::insert`].
    pub fn with(mut self, scope: SkillScope, skill: Skill) -> Self {
        self.insert(scope, skill);
        self
    }

    /// Skills registered under `scope`, in insertion order.
    pub fn scope(&self, scope: SkillScope) -> &[Skill] {
        self.scopes.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, scope: SkillScope) -> bool {
        !self.scope(scope).is_empty()
    }

    pub fn find(&self, id: SkillId) -> Option<&Skill> {
        self.scope(SkillScope::General).iter().find(|s| s.id == id)
    }
}
