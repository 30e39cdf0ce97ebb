//! In-memory world used by tests and the offline simulator.
//!
//! [`InMemoryWorld`] answers every [`WorldOracle`] query from a plain map of
//! characters and records every [`CombatPrimitives`] order it receives.
//! Movement is instantaneous: a move order teleports the actor to where the
//! move would have ended.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::env::{CombatPrimitives, OracleError, VisualEffect, WorldOracle};
use crate::skill::{Skill, SkillId};
use crate::state::{ActiveEffect, ActorId, Character, Conditions, InstanceId, Position};

/// Axis-aligned rectangle on the XY plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Zone {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_y..=self.max_y).contains(&position.y)
    }
}

/// An order received through [`CombatPrimitives`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    Attack { actor: ActorId, target: ActorId },
    Cast { actor: ActorId, skill: SkillId, target: ActorId },
    MoveTo { actor: ActorId, destination: Position },
    MoveToPawn { actor: ActorId, target: ActorId, offset: i32 },
    StopMoving { actor: ActorId },
    SetRunning { actor: ActorId, running: bool },
    ReturnHome { actor: ActorId },
    Evict { target: ActorId },
    Visual { actor: ActorId, effect: VisualEffect, enabled: bool },
}

impl Order {
    pub fn actor(&self) -> ActorId {
        match self {
            Self::Attack { actor, .. }
            | Self::Cast { actor, .. }
            | Self::MoveTo { actor, .. }
            | Self::MoveToPawn { actor, .. }
            | Self::StopMoving { actor }
            | Self::SetRunning { actor, .. }
            | Self::ReturnHome { actor }
            | Self::Visual { actor, .. } => *actor,
            Self::Evict { target } => *target,
        }
    }
}

#[derive(Debug)]
struct SandboxState {
    characters: BTreeMap<ActorId, Character>,
    homes: HashMap<ActorId, Position>,
    territories: HashMap<ActorId, Vec<Position>>,
    territory_cursor: HashMap<ActorId, usize>,
    peace_zones: Vec<Zone>,
    obstacles: Vec<Zone>,
    rift_rooms: HashMap<u8, Zone>,
    blocked_sight: HashSet<(ActorId, ActorId)>,
    town: Position,
    visibility_range: i32,
    orders: Vec<Order>,
}

impl Default for SandboxState {
    fn default() -> Self {
        Self {
            characters: BTreeMap::new(),
            homes: HashMap::new(),
            territories: HashMap::new(),
            territory_cursor: HashMap::new(),
            peace_zones: Vec::new(),
            obstacles: Vec::new(),
            rift_rooms: HashMap::new(),
            blocked_sight: HashSet::new(),
            town: Position::default(),
            visibility_range: InMemoryWorld::DEFAULT_VISIBILITY_RANGE,
            orders: Vec::new(),
        }
    }
}

/// Thread-safe sandbox world.
#[derive(Debug, Default)]
pub struct InMemoryWorld {
    state: RwLock<SandboxState>,
}

impl InMemoryWorld {
    /// Radius within which players count as observers.
    pub const DEFAULT_VISIBILITY_RANGE: i32 = 3000;

    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SandboxState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SandboxState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a character. Its current position becomes its home.
    pub fn insert(&self, character: Character) -> Result<(), OracleError> {
        let mut state = self.write();
        if state.characters.contains_key(&character.id) {
            return Err(OracleError::DuplicateCharacter(character.id));
        }
        state.homes.insert(character.id, character.position);
        state.characters.insert(character.id, character);
        Ok(())
    }

    /// Edits a character in place.
    pub fn update<F>(&self, id: ActorId, edit: F) -> Result<(), OracleError>
    where
        F: FnOnce(&mut Character),
    {
        let mut state = self.write();
        let character = state
            .characters
            .get_mut(&id)
            .ok_or(OracleError::UnknownCharacter(id))?;
        edit(character);
        Ok(())
    }

    pub fn remove(&self, id: ActorId) -> Option<Character> {
        let mut state = self.write();
        state.homes.remove(&id);
        state.characters.remove(&id)
    }

    pub fn set_home(&self, id: ActorId, home: Position) {
        self.write().homes.insert(id, home);
    }

    /// Points handed out round-robin by `random_territory_point`.
    pub fn set_territory(&self, id: ActorId, points: Vec<Position>) {
        self.write().territories.insert(id, points);
    }

    pub fn add_peace_zone(&self, zone: Zone) {
        self.write().peace_zones.push(zone);
    }

    pub fn add_obstacle(&self, zone: Zone) {
        self.write().obstacles.push(zone);
    }

    pub fn add_rift_room(&self, room: u8, zone: Zone) {
        self.write().rift_rooms.insert(room, zone);
    }

    pub fn set_town(&self, town: Position) {
        self.write().town = town;
    }

    pub fn set_visibility_range(&self, range: i32) {
        self.write().visibility_range = range;
    }

    /// Blocks line of sight between `a` and `b` in both directions.
    pub fn block_sight(&self, a: ActorId, b: ActorId) {
        let mut state = self.write();
        state.blocked_sight.insert((a, b));
        state.blocked_sight.insert((b, a));
    }

    pub fn characters(&self) -> Vec<Character> {
        self.read().characters.values().cloned().collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.read().orders.clone()
    }

    pub fn orders_of(&self, actor: ActorId) -> Vec<Order> {
        self.read()
            .orders
            .iter()
            .filter(|o| o.actor() == actor)
            .cloned()
            .collect()
    }

    pub fn take_orders(&self) -> Vec<Order> {
        std::mem::take(&mut self.write().orders)
    }

    fn record(state: &mut SandboxState, order: Order) {
        trace!(target: "sandbox", ?order, "order");
        state.orders.push(order);
    }

    fn blocked(state: &SandboxState, to: Position) -> bool {
        state.obstacles.iter().any(|zone| zone.contains(to))
    }
}

impl WorldOracle for InMemoryWorld {
    fn character(&self, id: ActorId) -> Option<Character> {
        self.read().characters.get(&id).cloned()
    }

    fn known_characters(&self, around: ActorId, radius: i32) -> Vec<Character> {
        let state = self.read();
        let Some(center) = state.characters.get(&around) else {
            return Vec::new();
        };
        state
            .characters
            .values()
            .filter(|c| c.id != around && c.instance == center.instance)
            .filter(|c| center.position.within(&c.position, radius))
            .cloned()
            .collect()
    }

    fn can_see(&self, from: ActorId, to: ActorId) -> bool {
        let state = self.read();
        let same_instance = match (state.characters.get(&from), state.characters.get(&to)) {
            (Some(a), Some(b)) => a.instance == b.instance,
            _ => false,
        };
        same_instance && !state.blocked_sight.contains(&(from, to))
    }

    fn can_move(&self, _from: Position, to: Position, _instance: InstanceId) -> bool {
        !Self::blocked(&self.read(), to)
    }

    fn move_check(&self, from: Position, to: Position, _instance: InstanceId) -> Position {
        if Self::blocked(&self.read(), to) { from } else { to }
    }

    fn in_peace_zone(&self, position: Position) -> bool {
        self.read().peace_zones.iter().any(|zone| zone.contains(position))
    }

    fn has_visible_players(&self, id: ActorId) -> bool {
        let state = self.read();
        let Some(me) = state.characters.get(&id) else {
            return false;
        };
        state.characters.values().any(|c| {
            c.is_player()
                && c.instance == me.instance
                && me.position.within(&c.position, state.visibility_range)
        })
    }

    fn random_territory_point(&self, id: ActorId) -> Option<Position> {
        let mut state = self.write();
        let points = state.territories.get(&id)?.clone();
        if points.is_empty() {
            return None;
        }
        let cursor = state.territory_cursor.entry(id).or_insert(0);
        let point = points[*cursor % points.len()];
        *cursor += 1;
        Some(point)
    }

    fn rift_room_contains(&self, room: u8, position: Position) -> bool {
        self.read()
            .rift_rooms
            .get(&room)
            .is_some_and(|zone| zone.contains(position))
    }

    fn is_auto_attackable(&self, target: ActorId, _by: ActorId) -> bool {
        self.read()
            .characters
            .get(&target)
            .is_some_and(|c| c.is_playable() || c.is_attackable_npc())
    }
}

impl CombatPrimitives for InMemoryWorld {
    fn attack(&self, actor: ActorId, target: ActorId) {
        Self::record(&mut self.write(), Order::Attack { actor, target });
    }

    fn cast(&self, actor: ActorId, skill: &Skill, target: ActorId) {
        let mut state = self.write();
        if let Some(caster) = state.characters.get_mut(&actor) {
            caster.mp.current = caster.mp.current.saturating_sub(skill.mp_cost);
        }
        if skill.is_continuous()
            && let Some(victim) = state.characters.get_mut(&target)
        {
            victim.effects.add(ActiveEffect {
                skill: skill.id,
                positive: !skill.is_debuff(),
                dispellable: true,
            });
        }
        Self::record(
            &mut state,
            Order::Cast {
                actor,
                skill: skill.id,
                target,
            },
        );
    }

    fn move_to(&self, actor: ActorId, destination: Position) {
        let mut state = self.write();
        if let Some(c) = state.characters.get_mut(&actor) {
            c.position = destination;
            c.conditions.remove(Conditions::MOVING);
        }
        Self::record(&mut state, Order::MoveTo { actor, destination });
    }

    fn move_to_pawn(&self, actor: ActorId, target: ActorId, offset: i32) {
        let mut state = self.write();
        let goal = state.characters.get(&target).map(|t| t.position);
        if let (Some(goal), Some(c)) = (goal, state.characters.get_mut(&actor)) {
            let distance = c.position.plane_distance(&goal);
            if distance > offset && distance > 0 {
                let ratio = offset as f64 / distance as f64;
                c.position = Position::new(
                    goal.x + ((c.position.x - goal.x) as f64 * ratio) as i32,
                    goal.y + ((c.position.y - goal.y) as f64 * ratio) as i32,
                    goal.z,
                );
            }
            c.conditions.remove(Conditions::MOVING);
        }
        Self::record(
            &mut state,
            Order::MoveToPawn {
                actor,
                target,
                offset,
            },
        );
    }

    fn stop_moving(&self, actor: ActorId) {
        let mut state = self.write();
        if let Some(c) = state.characters.get_mut(&actor) {
            c.conditions.remove(Conditions::MOVING);
        }
        Self::record(&mut state, Order::StopMoving { actor });
    }

    fn set_running(&self, actor: ActorId, running: bool) {
        let mut state = self.write();
        if let Some(c) = state.characters.get_mut(&actor) {
            c.conditions.set(Conditions::RUNNING, running);
        }
        Self::record(&mut state, Order::SetRunning { actor, running });
    }

    fn return_home(&self, actor: ActorId) {
        let mut state = self.write();
        if let Some(home) = state.homes.get(&actor).copied()
            && let Some(c) = state.characters.get_mut(&actor)
        {
            c.position = home;
        }
        Self::record(&mut state, Order::ReturnHome { actor });
    }

    fn evict_to_town(&self, target: ActorId, notice: &str) {
        let mut state = self.write();
        let town = state.town;
        if let Some(c) = state.characters.get_mut(&target) {
            c.position = town;
        }
        trace!(target: "sandbox", %target, notice, "evicted");
        Self::record(&mut state, Order::Evict { target });
    }

    fn set_visual_effect(&self, actor: ActorId, effect: VisualEffect, enabled: bool) {
        Self::record(
            &mut self.write(),
            Order::Visual {
                actor,
                effect,
                enabled,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NpcInfo;

    fn world_with_two() -> InMemoryWorld {
        let world = InMemoryWorld::new();
        world
            .insert(Character::player(ActorId(1), Position::new(0, 0, 0)))
            .unwrap();
        world
            .insert(Character::npc(
                ActorId(2),
                NpcInfo::monster(vec![]),
                Position::new(300, 400, 0),
            ))
            .unwrap();
        world
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let world = world_with_two();
        let err = world
            .insert(Character::player(ActorId(1), Position::default()))
            .unwrap_err();
        assert_eq!(err, OracleError::DuplicateCharacter(ActorId(1)));
    }

    #[test]
    fn known_characters_respects_radius() {
        let world = world_with_two();
        assert!(world.known_characters(ActorId(1), 499).is_empty());
        assert_eq!(world.known_characters(ActorId(1), 500).len(), 1);
    }

    #[test]
    fn move_to_pawn_stops_at_offset() {
        let world = world_with_two();
        world.move_to_pawn(ActorId(2), ActorId(1), 100);
        let npc = world.character(ActorId(2)).unwrap();
        assert_eq!(npc.position.plane_distance(&Position::default()), 100);
        assert_eq!(world.orders_of(ActorId(2)).len(), 1);
    }

    #[test]
    fn obstacles_reject_moves() {
        let world = world_with_two();
        world.add_obstacle(Zone::new(900, 900, 1100, 1100));
        let from = Position::new(0, 0, 0);
        let to = Position::new(1000, 1000, 0);
        assert!(!world.can_move(from, to, InstanceId::WORLD));
        assert_eq!(world.move_check(from, to, InstanceId::WORLD), from);
    }

    #[test]
    fn territory_points_cycle() {
        let world = world_with_two();
        let points = vec![Position::new(1, 1, 0), Position::new(2, 2, 0)];
        world.set_territory(ActorId(2), points.clone());
        assert_eq!(world.random_territory_point(ActorId(2)), Some(points[0]));
        assert_eq!(world.random_territory_point(ActorId(2)), Some(points[1]));
        assert_eq!(world.random_territory_point(ActorId(2)), Some(points[0]));
    }
}
