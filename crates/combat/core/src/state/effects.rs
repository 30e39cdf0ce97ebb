//! Active skill effects on a character.
//!
//! The AI only needs to know which skills currently affect a character and
//! whether any of those effects is a buff a dispel could strip.

use arrayvec::ArrayVec;

use crate::config::AiConfig;
use crate::skill::SkillId;

/// Bounded set of effects, one entry per skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<ActiveEffect, { AiConfig::MAX_ACTIVE_EFFECTS }>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub skill: SkillId,
    /// Buff (true) or debuff (false).
    pub positive: bool,
    /// Can be removed by a dispel.
    pub dispellable: bool,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Returns true if an effect from `skill` is active.
    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.effects.iter().any(|e| e.skill == skill)
    }

    /// Returns true if at least one buff can be dispelled.
    pub fn has_removable_buff(&self) -> bool {
        self.effects.iter().any(|e| e.positive && e.dispellable)
    }

    /// Adds an effect. Re-applying a skill refreshes its entry in place; new
    /// effects are dropped once the set is full.
    pub fn add(&mut self, effect: ActiveEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.skill == effect.skill) {
            *existing = effect;
            return;
        }
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    pub fn remove(&mut self, skill: SkillId) {
        self.effects.retain(|e| e.skill != skill);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
