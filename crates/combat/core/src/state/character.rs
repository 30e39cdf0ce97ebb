//! Character snapshots as reported by the world.

use bitflags::bitflags;

use super::{ActiveEffects, ActorId, ClanId, FactionId, InstanceId, Meter, Position};
use crate::skill::SkillId;
use crate::template::Role;

bitflags! {
    /// Transient conditions the world reports for a character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Conditions: u32 {
        const INVULNERABLE       = 1 << 0;
        /// Rooted, stunned, sleeping or otherwise unable to walk.
        const MOVEMENT_DISABLED  = 1 << 1;
        /// Held in place by an immobilizing effect (subset of movement disabled).
        const IMMOBILIZED        = 1 << 2;
        const CASTING            = 1 << 3;
        const ATTACKING          = 1 << 4;
        const CORE_AI_DISABLED   = 1 << 5;
        const ALL_SKILLS_DISABLED = 1 << 6;
        /// Controlled by an external effect (charm, confusion script).
        const OUT_OF_CONTROL     = 1 << 7;
        const CONFUSED           = 1 << 8;
        /// Magic channel silenced.
        const MUTED              = 1 << 9;
        /// Physical skill channel silenced.
        const PHYSICAL_MUTED     = 1 << 10;
        const MOVING             = 1 << 11;
        const RUNNING            = 1 << 12;
        /// Undetectable stealth movement.
        const SILENT_MOVE        = 1 << 13;
    }
}

/// Player-only attributes the aggro rules look at.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerInfo {
    pub karma: i32,
    /// 0 for ordinary accounts, positive for staff.
    pub access_level: u8,
    /// Inside the grace window that follows a fake death.
    pub recent_fake_death: bool,
    /// Dimensional rift room the player currently occupies.
    pub rift_room: Option<u8>,
    /// Registered participant of the running festival event.
    pub event_participant: bool,
}

impl PlayerInfo {
    pub const fn is_staff(&self) -> bool {
        self.access_level > 0
    }
}

/// NPC attributes other attackables look at (faction assist, chaos, guards).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcInfo {
    pub role: Role,
    pub factions: Vec<FactionId>,
    /// Template aggression flag.
    pub aggressive: bool,
    /// False for merchants, gatekeepers and other non-combat NPCs.
    pub attackable: bool,
}

impl NpcInfo {
    pub fn monster(factions: Vec<FactionId>) -> Self {
        Self {
            role: Role::Monster,
            factions,
            aggressive: false,
            attackable: true,
        }
    }

    pub fn shares_faction(&self, factions: &[FactionId]) -> bool {
        self.factions.iter().any(|f| factions.contains(f))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player(PlayerInfo),
    /// Pet or servitor; aggro rules act on the owning player.
    Summon { owner: ActorId, player: PlayerInfo },
    Npc(NpcInfo),
    Door,
    StaticObject,
}

/// Snapshot of a single character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: ActorId,
    pub kind: CharacterKind,
    pub position: Position,
    pub instance: InstanceId,
    pub hp: Meter,
    pub mp: Meter,
    pub collision_radius: i32,
    pub conditions: Conditions,
    pub effects: ActiveEffects,
    /// Skills currently on cooldown or otherwise disabled.
    pub disabled_skills: Vec<SkillId>,
    pub clan: Option<ClanId>,
}

impl Character {
    fn with_kind(id: ActorId, kind: CharacterKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            instance: InstanceId::WORLD,
            hp: Meter::full(1000),
            mp: Meter::full(500),
            collision_radius: 10,
            conditions: Conditions::empty(),
            effects: ActiveEffects::empty(),
            disabled_skills: Vec::new(),
            clan: None,
        }
    }

    pub fn player(id: ActorId, position: Position) -> Self {
        Self::with_kind(id, CharacterKind::Player(PlayerInfo::default()), position)
    }

    pub fn npc(id: ActorId, info: NpcInfo, position: Position) -> Self {
        Self::with_kind(id, CharacterKind::Npc(info), position)
    }

    pub fn summon(id: ActorId, owner: ActorId, player: PlayerInfo, position: Position) -> Self {
        Self::with_kind(id, CharacterKind::Summon { owner, player }, position)
    }

    pub fn door(id: ActorId, position: Position) -> Self {
        Self::with_kind(id, CharacterKind::Door, position)
    }

    pub fn with_hp(mut self, current: u32, maximum: u32) -> Self {
        self.hp = Meter::new(current, maximum);
        self
    }

    pub fn with_mp(mut self, current: u32, maximum: u32) -> Self {
        self.mp = Meter::new(current, maximum);
        self
    }

    pub fn with_collision(mut self, radius: i32) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions |= conditions;
        self
    }

    pub fn in_instance(mut self, instance: InstanceId) -> Self {
        self.instance = instance;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.hp.is_empty()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player(_))
    }

    pub fn is_summon(&self) -> bool {
        matches!(self.kind, CharacterKind::Summon { .. })
    }

    /// Players and their summons.
    pub fn is_playable(&self) -> bool {
        self.is_player() || self.is_summon()
    }

    pub fn is_door_or_static(&self) -> bool {
        matches!(self.kind, CharacterKind::Door | CharacterKind::StaticObject)
    }

    pub fn npc_info(&self) -> Option<&NpcInfo> {
        match &self.kind {
            CharacterKind::Npc(info) => Some(info),
            _ => None,
        }
    }

    /// NPC that can be fought (monsters, guards, bosses).
    pub fn is_attackable_npc(&self) -> bool {
        self.npc_info().is_some_and(|info| info.attackable)
    }

    /// The player responsible for this character: itself or a summon's owner.
    pub fn acting_player(&self) -> Option<&PlayerInfo> {
        match &self.kind {
            CharacterKind::Player(info) => Some(info),
            CharacterKind::Summon { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn has(&self, condition: Conditions) -> bool {
        self.conditions.contains(condition)
    }

    pub fn is_moving(&self) -> bool {
        self.has(Conditions::MOVING)
    }

    pub fn is_running(&self) -> bool {
        self.has(Conditions::RUNNING)
    }

    pub fn is_movement_disabled(&self) -> bool {
        self.has(Conditions::MOVEMENT_DISABLED)
    }

    pub fn is_skill_disabled(&self, skill: SkillId) -> bool {
        self.disabled_skills.contains(&skill)
    }

    pub fn shares_faction(&self, factions: &[FactionId]) -> bool {
        self.npc_info().is_some_and(|info| info.shares_faction(factions))
    }

    /// Plane distance minus this character's own collision radius.
    pub fn reach_to(&self, other: &Character) -> i32 {
        self.position.plane_distance(&other.position) - self.collision_radius
    }
}
