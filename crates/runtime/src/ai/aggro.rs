//! Auto-attack eligibility.

use combat_core::{Capabilities, Character, Conditions, Role};

use super::context::Think;

impl Think<'_> {
    /// Whether the actor may pick `target` up as a threat on its own.
    ///
    /// Rules are checked in order and the first one that applies decides.
    pub(crate) fn can_auto_attack(&self, target: &Character) -> bool {
        let template = self.template();
        let config = self.config();
        let acting = target.acting_player();

        let staff = acting.is_some_and(|p| p.is_staff());
        if target.has(Conditions::INVULNERABLE) && !staff {
            return false;
        }
        if target.is_door_or_static() || target.is_dead() {
            return false;
        }

        if target.is_playable() {
            if !self.me.position.within(&target.position, template.aggro_range) {
                return false;
            }
            let sees_sneakers =
                template.is_raid() || template.is(Capabilities::CAN_SEE_SILENT_MOVE);
            if target.has(Conditions::SILENT_MOVE) && !sees_sneakers {
                return false;
            }
        }

        if let Some(player) = acting {
            if player.is_staff() && player.access_level < config.staff_aggro_access_level {
                return false;
            }
            if player.recent_fake_death {
                return false;
            }
            if let Some(room) = player.rift_room
                && template.role == Role::RiftInvader
                && !self.world().rift_room_contains(room, self.me.position)
            {
                return false;
            }
        }

        let karma = acting.filter(|_| target.is_player()).map_or(0, |p| p.karma);
        if template.role.is_guard() {
            if karma > 0 {
                return self.can_see(target);
            }
            let aggressive_mob = target.npc_info().is_some_and(|info| info.aggressive);
            if config.guard_attacks_aggressive_mobs && aggressive_mob {
                return self.can_see(target);
            }
            return false;
        }
        if template.role == Role::Friendly {
            return karma > 0 && self.can_see(target);
        }

        if target.is_attackable_npc() {
            if !self.world().is_auto_attackable(target.id, self.id()) {
                return false;
            }
            if template.is(Capabilities::CHAOTIC)
                && self.me.position.within(&target.position, template.aggro_range)
            {
                if target.shares_faction(&template.factions) {
                    return false;
                }
                return self.can_see(target);
            }
        }
        if target.npc_info().is_some() {
            return false;
        }

        if !config.aggro_in_peace_zones && self.world().in_peace_zone(target.position) {
            let chasing_out = self.brain.attack_target == Some(target.id)
                && !self.world().in_peace_zone(self.me.position);
            if !chasing_out {
                return false;
            }
        }

        if template.is(Capabilities::CHAMPION) && config.passive_champions {
            return false;
        }

        template.is_aggressive() && self.can_see(target)
    }
}
