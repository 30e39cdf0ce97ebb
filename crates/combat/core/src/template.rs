//! Static actor templates.
//!
//! Behavior branches switch on an explicit [`Role`] tag plus orthogonal
//! [`Capabilities`] rather than on a type hierarchy.

use bitflags::bitflags;

use crate::skill::SkillBook;
use crate::state::FactionId;

/// Closed set of attackable roles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    Guard,
    SiegeGuard,
    /// Town-friendly mob that only hunts flagged players.
    Friendly,
    #[default]
    Monster,
    RaidBoss,
    GrandBoss,
    /// Follows a leader; raid minions also carry [`Capabilities::RAID_MINION`].
    Minion,
    /// Dimensional rift invader, bound to its room.
    RiftInvader,
    /// Festival event monster that evicts non-participants.
    FestivalMonster,
}

impl Role {
    pub const fn is_guard(&self) -> bool {
        matches!(self, Self::Guard | Self::SiegeGuard)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u16 {
        /// Hunts other attackables outside its factions.
        const CHAOTIC             = 1 << 0;
        const CHAMPION            = 1 << 1;
        /// Route walker; guards with this flag do not return home.
        const WALKER              = 1 << 2;
        const NO_RANDOM_WALK      = 1 << 3;
        /// Never returns to or wanders around its spawn.
        const NO_RETURN           = 1 << 4;
        const CAN_SEE_SILENT_MOVE = 1 << 5;
        const RAID_MINION         = 1 << 6;
        const AGGRESSIVE          = 1 << 7;
    }
}

/// Combat archetype declared by the template.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    #[default]
    Fighter,
    Archer,
    Mage,
    Healer,
    Balanced,
}

impl Archetype {
    pub const fn is_caster(&self) -> bool {
        matches!(self, Self::Mage | Self::Healer)
    }
}

/// Everything the AI reads from static data about one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorTemplate {
    pub name: String,
    pub role: Role,
    pub capabilities: Capabilities,
    pub archetype: Archetype,
    pub factions: Vec<FactionId>,
    /// Radius in which same-faction actors are called for help.
    pub faction_range: i32,
    pub aggro_range: i32,
    pub physical_attack_range: i32,
    /// Bounds of the skill-chance window, in percent.
    pub min_skill_chance: u32,
    pub max_skill_chance: u32,
    pub short_range_chance: u32,
    pub long_range_chance: u32,
    pub skills: SkillBook,
}

impl ActorTemplate {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            capabilities: Capabilities::empty(),
            archetype: Archetype::Fighter,
            factions: Vec::new(),
            faction_range: 0,
            aggro_range: 0,
            physical_attack_range: 40,
            min_skill_chance: 0,
            max_skill_chance: 0,
            short_range_chance: 0,
            long_range_chance: 0,
            skills: SkillBook::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    pub fn with_factions(mut self, factions: Vec<FactionId>, range: i32) -> Self {
        self.factions = factions;
        self.faction_range = range;
        self
    }

    pub fn with_aggro_range(mut self, aggro_range: i32) -> Self {
        self.aggro_range = aggro_range;
        self
    }

    pub fn with_skills(mut self, skills: SkillBook) -> Self {
        self.skills = skills;
        self
    }

    pub fn is(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Raid bosses, grand bosses and raid minions.
    pub fn is_raid(&self) -> bool {
        matches!(self.role, Role::RaidBoss | Role::GrandBoss) || self.is(Capabilities::RAID_MINION)
    }

    pub fn is_aggressive(&self) -> bool {
        self.is(Capabilities::AGGRESSIVE) && self.aggro_range > 0
    }
}
