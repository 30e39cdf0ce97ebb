//! Spatial and visibility queries answered by the world.

use crate::state::{ActorId, Character, InstanceId, Position};

/// Read-only view of the world the AI reasons about.
///
/// Every call returns fresh data. Characters that despawned between two calls
/// simply stop showing up; callers treat `None` as "skip this candidate".
pub trait WorldOracle: Send + Sync {
    /// Current snapshot of a character.
    fn character(&self, id: ActorId) -> Option<Character>;

    /// Characters within `radius` of `around` on the XY plane, in the same
    /// instance, excluding `around` itself.
    fn known_characters(&self, around: ActorId, radius: i32) -> Vec<Character>;

    /// Line of sight between two characters.
    fn can_see(&self, from: ActorId, to: ActorId) -> bool;

    /// Whether a straight walk from `from` to `to` is unobstructed.
    fn can_move(&self, from: Position, to: Position, instance: InstanceId) -> bool;

    /// Furthest reachable point along the way from `from` to `to`.
    fn move_check(&self, from: Position, to: Position, instance: InstanceId) -> Position;

    fn in_peace_zone(&self, position: Position) -> bool;

    /// Whether any player currently observes the actor.
    fn has_visible_players(&self, id: ActorId) -> bool;

    /// Random point inside the actor's spawn territory, if it has one.
    fn random_territory_point(&self, id: ActorId) -> Option<Position>;

    fn rift_room_contains(&self, room: u8, position: Position) -> bool;

    /// Whether `by` may attack `target` without an explicit order.
    fn is_auto_attackable(&self, target: ActorId, by: ActorId) -> bool;
}
