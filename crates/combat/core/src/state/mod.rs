//! World-facing state snapshots consumed by the AI.
//!
//! The AI never owns characters. Every tick it asks the world for a fresh
//! [`Character`] snapshot and refers to everything else by [`ActorId`].
mod character;
mod effects;

pub use character::{Character, CharacterKind, Conditions, NpcInfo, PlayerInfo};
pub use effects::{ActiveEffect, ActiveEffects};

/// Simulation tick counter (one tick = 100 ms of game time).
pub type Tick = u64;

/// Unique identifier of any character in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Faction ("clan" in template data) an NPC template belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionId(pub u16);

/// Player clan, used by the heal and resurrection scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClanId(pub u32);

/// Instanced world partition. `InstanceId::WORLD` is the shared overworld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u32);

impl InstanceId {
    pub const WORLD: Self = Self(0);
}

/// Point in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared distance on the XY plane.
    pub fn plane_distance_sq(&self, other: &Position) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Distance on the XY plane, truncated toward zero.
    pub fn plane_distance(&self, other: &Position) -> i32 {
        (self.plane_distance_sq(other) as f64).sqrt() as i32
    }

    /// Returns true if `other` lies within `radius` on the XY plane.
    pub fn within(&self, other: &Position, radius: i32) -> bool {
        let r = radius.max(0) as i64;
        self.plane_distance_sq(other) <= r * r
    }

    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Current/maximum pair for hit points and mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: u32,
    pub maximum: u32,
}

impl Meter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Whole percentage of the maximum, rounded down. An empty maximum reads
    /// as 100 so division never happens on zero.
    pub fn percent(&self) -> i32 {
        if self.maximum == 0 {
            return 100;
        }
        ((self.current as u64 * 100) / self.maximum as u64) as i32
    }
}
