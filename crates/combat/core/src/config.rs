/// Tunable parameters of the attackable AI.
///
/// Every field has a default, so partial configuration files only need to
/// name the values they change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Ticks an actor keeps attacking without being hit back.
    pub attack_timeout_ticks: u64,
    /// Minimum ticks between two self-buff attempts on entering ATTACK.
    pub buff_regate_ticks: u64,
    /// Global aggro counter value right after spawn.
    pub spawn_global_aggro: i32,
    /// Wander radius around a fixed spawn. Leash radius is twice this.
    pub max_drift_range: i32,
    /// One in this many ACTIVE ticks triggers a wander step or minion buff.
    pub random_walk_rate: u32,
    /// One in this many ACTIVE ticks forgets attackers when fully healed.
    pub forget_rate: u32,
    /// Radius scanned for aggro candidates.
    pub scan_range: i32,

    pub raid_chaos_time: u32,
    pub grand_chaos_time: u32,
    pub minion_chaos_time: u32,

    /// Helpers farther apart in height than this ignore a faction call.
    pub faction_z_range: i32,

    /// Percent chance per tick to sidestep out of a clump.
    pub clump_chance: u32,
    /// Percent chance per tick for long-range actors to back off.
    pub kite_chance: u32,
    pub kite_min_attack_range: i32,
    /// Distance beyond combined collision at which kiting triggers.
    pub kite_trigger_range: i32,
    pub kite_distance: i32,

    pub fear_flee_range: i32,
    /// Suicide skills are only used below this HP percentage.
    pub suicide_hp_percent: i32,
    /// Distance separating short-range from long-range skill use.
    pub short_range_split: i32,

    pub minion_leash_range: i32,
    pub raid_minion_leash_range: i32,
    pub minion_min_radius: i32,

    /// Hate transferred on reconsideration when no most-hated entry exists.
    pub reconsider_fallback_hate: i64,

    /// Staff accounts below this access level never draw aggro.
    pub staff_aggro_access_level: u8,
    pub guard_attacks_aggressive_mobs: bool,
    pub aggro_in_peace_zones: bool,
    pub passive_champions: bool,
}

impl AiConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIVE_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_TIMEOUT_TICKS: u64 = 1200;
    pub const DEFAULT_BUFF_REGATE_TICKS: u64 = 30;
    pub const DEFAULT_SPAWN_GLOBAL_AGGRO: i32 = -10;
    pub const DEFAULT_MAX_DRIFT_RANGE: i32 = 300;
    pub const DEFAULT_RANDOM_WALK_RATE: u32 = 30;
    pub const DEFAULT_FORGET_RATE: u32 = 500;
    pub const DEFAULT_CHAOS_TIME: u32 = 10;
    pub const DEFAULT_FACTION_Z_RANGE: i32 = 600;
    pub const DEFAULT_FEAR_FLEE_RANGE: i32 = 500;
    pub const DEFAULT_RECONSIDER_FALLBACK_HATE: i64 = 2000;

    pub fn new() -> Self {
        Self {
            attack_timeout_ticks: Self::DEFAULT_ATTACK_TIMEOUT_TICKS,
            buff_regate_ticks: Self::DEFAULT_BUFF_REGATE_TICKS,
            spawn_global_aggro: Self::DEFAULT_SPAWN_GLOBAL_AGGRO,
            max_drift_range: Self::DEFAULT_MAX_DRIFT_RANGE,
            random_walk_rate: Self::DEFAULT_RANDOM_WALK_RATE,
            forget_rate: Self::DEFAULT_FORGET_RATE,
            scan_range: 2000,
            raid_chaos_time: Self::DEFAULT_CHAOS_TIME,
            grand_chaos_time: Self::DEFAULT_CHAOS_TIME,
            minion_chaos_time: Self::DEFAULT_CHAOS_TIME,
            faction_z_range: Self::DEFAULT_FACTION_Z_RANGE,
            clump_chance: 3,
            kite_chance: 15,
            kite_min_attack_range: 700,
            kite_trigger_range: 60,
            kite_distance: 300,
            fear_flee_range: Self::DEFAULT_FEAR_FLEE_RANGE,
            suicide_hp_percent: 30,
            short_range_split: 150,
            minion_leash_range: 200,
            raid_minion_leash_range: 500,
            minion_min_radius: 30,
            reconsider_fallback_hate: Self::DEFAULT_RECONSIDER_FALLBACK_HATE,
            staff_aggro_access_level: 100,
            guard_attacks_aggressive_mobs: false,
            aggro_in_peace_zones: false,
            passive_champions: false,
        }
    }

    /// Twice the drift range: past this distance from spawn an actor refuses
    /// to go idle.
    pub fn leash_range(&self) -> i32 {
        self.max_drift_range.saturating_mul(2)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
