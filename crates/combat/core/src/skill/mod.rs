//! Skill descriptions as far as the AI is concerned.
//!
//! Effect resolution belongs to the world's cast primitive. The AI only sees
//! ranges, costs, targeting and the effect tags it branches on.
mod book;

pub use book::{SkillBook, SkillScope};

use bitflags::bitflags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u32);

/// How a skill picks what it lands on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetType {
    /// Caster only.
    Caster,
    /// Single explicit target.
    One,
    /// Caster's party.
    Party,
    /// Caster's clan members around it.
    Clan,
    /// Everything around the caster.
    Aura,
    BehindAura,
    FrontAura,
    /// Corpses around the caster.
    AuraCorpseMob,
    /// Everything around the target.
    Area,
    BehindArea,
    FrontArea,
}

impl TargetType {
    /// Centered on the caster.
    pub const fn is_aura(&self) -> bool {
        matches!(
            self,
            Self::Aura | Self::BehindAura | Self::FrontAura | Self::AuraCorpseMob
        )
    }

    /// Centered on the target.
    pub const fn is_area(&self) -> bool {
        matches!(self, Self::Area | Self::BehindArea | Self::FrontArea)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SkillFlags: u8 {
        /// Leaves a lasting effect (buff or debuff).
        const CONTINUOUS   = 1 << 0;
        const DEBUFF       = 1 << 1;
        /// Ignores mute checks.
        const STATIC       = 1 << 2;
        /// Magic channel; physical otherwise.
        const MAGIC        = 1 << 3;
        /// May be cast while another cast is in progress.
        const SIMULTANEOUS = 1 << 4;
    }
}

bitflags! {
    /// Effect tags the skill engine branches on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EffectSet: u16 {
        const DISPEL          = 1 << 0;
        const HEAL            = 1 << 1;
        const PHYSICAL_ATTACK = 1 << 2;
        const MAGICAL_ATTACK  = 1 << 3;
        const HP_DRAIN        = 1 << 4;
        const SLEEP           = 1 << 5;
        const STUN            = 1 << 6;
        const ROOT            = 1 << 7;
        const PARALYZE        = 1 << 8;
        const MUTE            = 1 << 9;
        const FEAR            = 1 << 10;
        const DAMAGE_OVER_TIME = 1 << 11;
        const RESURRECTION    = 1 << 12;

        const DAMAGE = Self::PHYSICAL_ATTACK.bits() | Self::MAGICAL_ATTACK.bits() | Self::HP_DRAIN.bits();
        const CROWD_CONTROL = Self::STUN.bits() | Self::ROOT.bits() | Self::PARALYZE.bits()
            | Self::MUTE.bits() | Self::FEAR.bits();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub cast_range: i32,
    pub affect_range: i32,
    pub mp_cost: u32,
    pub target: TargetType,
    pub flags: SkillFlags,
    pub effects: EffectSet,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>, target: TargetType) -> Self {
        Self {
            id,
            name: name.into(),
            cast_range: 0,
            affect_range: 0,
            mp_cost: 0,
            target,
            flags: SkillFlags::empty(),
            effects: EffectSet::empty(),
        }
    }

    pub fn with_ranges(mut self, cast_range: i32, affect_range: i32) -> Self {
        self.cast_range = cast_range;
        self.affect_range = affect_range;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_flags(mut self, flags: SkillFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_effects(mut self, effects: EffectSet) -> Self {
        self.effects |= effects;
        self
    }

    pub fn is_continuous(&self) -> bool {
        self.flags.contains(SkillFlags::CONTINUOUS)
    }

    pub fn is_debuff(&self) -> bool {
        self.flags.contains(SkillFlags::DEBUFF)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(SkillFlags::STATIC)
    }

    pub fn is_magic(&self) -> bool {
        self.flags.contains(SkillFlags::MAGIC)
    }

    pub fn is_simultaneous(&self) -> bool {
        self.flags.contains(SkillFlags::SIMULTANEOUS)
    }

    pub fn has_any(&self, effects: EffectSet) -> bool {
        self.effects.intersects(effects)
    }

    /// Aura or area targeting.
    pub fn is_aoe(&self) -> bool {
        self.target.is_aura() || self.target.is_area()
    }

    /// Lands on the caster's group instead of a single target.
    pub fn is_party(&self) -> bool {
        matches!(self.target, TargetType::Party | TargetType::Clan)
    }

    pub fn is_self(&self) -> bool {
        self.target == TargetType::Caster
    }

    /// Carries at least one effect tag the skill engine has a branch for.
    pub fn has_recognized_effect(&self) -> bool {
        self.is_continuous() || !self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aoe_covers_aura_and_area_targets() {
        let aura = Skill::new(SkillId(1), "Quake", TargetType::Aura);
        let area = Skill::new(SkillId(2), "Blizzard", TargetType::FrontArea);
        let single = Skill::new(SkillId(3), "Bolt", TargetType::One);
        assert!(aura.is_aoe() && area.is_aoe());
        assert!(!single.is_aoe());
    }

    #[test]
    fn target_type_parses_snake_case() {
        assert_eq!("behind_aura".parse::<TargetType>().ok(), Some(TargetType::BehindAura));
        assert_eq!("one".parse::<TargetType>().ok(), Some(TargetType::One));
    }

    #[test]
    fn plain_skill_has_no_recognized_effect() {
        let plain = Skill::new(SkillId(4), "Strike", TargetType::One);
        assert!(!plain.has_recognized_effect());
        assert!(
            plain
                .with_effects(EffectSet::STUN)
                .has_any(EffectSet::CROWD_CONTROL)
        );
    }
}
