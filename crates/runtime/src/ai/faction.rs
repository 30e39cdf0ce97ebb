//! Faction assist: calling nearby allies onto the actor's target.

use combat_core::{Character, Role};
use tracing::trace;

use super::AiCommand;
use super::context::Think;

impl Think<'_> {
    /// Asks every idle same-faction ally in range to join the fight against
    /// `target`, handing over the actor's own hate.
    pub(crate) fn call_faction(&mut self, target: &Character) {
        let template = self.template();
        if template.factions.is_empty() {
            return;
        }
        if template.role == Role::RiftInvader
            && let Some(room) = target.acting_player().and_then(|p| p.rift_room)
            && !self.world().rift_room_contains(room, self.me.position)
        {
            return;
        }

        let radius = template.faction_range + self.me.collision_radius;
        let hate = self.brain.threat.hate_of(target.id);
        let z_range = self.config().faction_z_range;

        for helper in self.world().known_characters(self.id(), radius) {
            let eligible = !helper.is_dead()
                && helper.shares_faction(&template.factions)
                && (helper.position.z - target.position.z).abs() < z_range
                && helper.instance == self.me.instance
                && self
                    .peers
                    .intention_of(helper.id)
                    .is_some_and(|kind| kind.is_available());
            if !eligible {
                continue;
            }

            if target.is_playable() {
                if !self.env.listener.on_aggression(helper.id, target.id, hate) {
                    continue;
                }
                self.send_aggression(&helper, target, hate);
                self.env.listener.on_faction_call(helper.id, self.id(), target.id);
            } else if target.is_attackable_npc() {
                self.send_aggression(&helper, target, hate);
            }
        }
    }

    fn send_aggression(&self, helper: &Character, target: &Character, hate: i64) {
        trace!(target: "runtime::ai", actor = %self.id(), helper = %helper.id, target = %target.id, "faction call");
        self.peers.send(
            helper.id,
            AiCommand::Aggression {
                target: target.id,
                hate,
            },
        );
    }
}
