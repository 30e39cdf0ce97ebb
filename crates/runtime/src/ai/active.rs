//! ACTIVE: aggro acquisition, forgetting and idle movement.

use combat_core::{
    ActorTemplate, Capabilities, Character, Conditions, Intention, Position, RngOracle, Role,
    SkillScope,
};
use tracing::{debug, trace};

use super::context::Think;

impl Think<'_> {
    pub(crate) fn think_active(&mut self) {
        let template = self.template();

        self.brain.global_aggro -= self.brain.global_aggro.signum();

        if self.brain.global_aggro >= 0 {
            let scan_range = self.config().scan_range;
            for candidate in self.world().known_characters(self.id(), scan_range) {
                if self.brain.threat.hate_of(candidate.id) == 0 && self.can_auto_attack(&candidate)
                {
                    self.brain.threat.notice(candidate.id);
                }
            }
        }

        let hated = if self.me.has(Conditions::CONFUSED) {
            self.brain.attack_target
        } else {
            self.brain.threat.most_hated()
        };
        if let Some(target) = hated
            && !self.me.has(Conditions::CORE_AI_DISABLED)
        {
            let aggro = self.brain.threat.hate_of(target) + i64::from(self.brain.global_aggro);
            if aggro > 0 {
                self.set_running(true);
                self.set_intention(Intention::Attack { target });
                return;
            }
        }

        if self.me.hp.is_full()
            && self.me.mp.is_full()
            && !self.brain.attacked_by.is_empty()
            && self.rng().below(self.config().forget_rate) == 0
        {
            debug!(target: "runtime::ai", actor = %self.id(), "forgot aggro");
            self.brain.threat.clear();
            self.brain.attacked_by.clear();
            self.brain.fallen_minions.clear();
        }

        self.idle_movement(&template);
    }

    fn idle_movement(&mut self, template: &ActorTemplate) {
        if template.is(Capabilities::NO_RETURN) {
            return;
        }
        if template.role.is_guard() {
            if !template.is(Capabilities::WALKER) {
                self.combat().return_home(self.id());
                self.refresh();
            }
            return;
        }
        if template.role == Role::FestivalMonster {
            return;
        }

        if let Some(leader) = self
            .brain
            .leader
            .and_then(|id| self.character(id))
            .filter(|leader| !leader.is_dead())
        {
            self.follow_leader(template, &leader);
            return;
        }

        let Some(spawn) = self.brain.spawn else {
            return;
        };
        if template.is(Capabilities::NO_RANDOM_WALK)
            || self.rng().below(self.config().random_walk_rate) != 0
        {
            return;
        }
        if self.try_self_buffs(template) {
            return;
        }

        let range = self.config().max_drift_range;
        let here = self.me.position;
        let destination = if spawn.territorial {
            let Some(point) = self.world().random_territory_point(self.id()) else {
                return;
            };
            let step = 2 * i64::from(range);
            let distance_sq = here.plane_distance_sq(&point);
            if distance_sq > step * step {
                // Far points are approached one drift range at a time.
                let delay = (distance_sq as f64).sqrt() / f64::from(range);
                Position::new(
                    here.x + ((point.x - here.x) as f64 / delay) as i32,
                    here.y + ((point.y - here.y) as f64 / delay) as i32,
                    point.z,
                )
            } else {
                point
            }
        } else {
            if !here.within(&spawn.point, range) {
                self.combat().return_home(self.id());
                self.refresh();
                return;
            }
            let jitter = |rng: &dyn RngOracle| rng.between(0, 2 * range as u32) as i32 - range;
            spawn.point.offset(jitter(self.rng()), jitter(self.rng()), 0)
        };

        let destination = self.world().move_check(here, destination, self.me.instance);
        trace!(target: "runtime::ai", actor = %self.id(), ?destination, "wander");
        self.move_to(destination);
    }

    /// Keeps a minion inside its leash around the leader.
    fn follow_leader(&mut self, template: &ActorTemplate, leader: &Character) {
        self.set_running(leader.is_running());

        let config = self.config();
        let offset = if template.is(Capabilities::RAID_MINION) {
            config.raid_minion_leash_range
        } else {
            config.minion_leash_range
        };
        let min_radius = config.minion_min_radius;

        let distance_sq = self.me.position.plane_distance_sq(&leader.position);
        let leash = i64::from(offset);
        if distance_sq > leash * leash {
            let rng = self.rng();
            let x1 = rng.between(2 * min_radius as u32, 2 * offset as u32) as i32;
            let y1 = rng.between(x1 as u32, 2 * offset as u32) as i32;
            let y1 = ((i64::from(y1).pow(2) - i64::from(x1).pow(2)) as f64).sqrt() as i32;
            let spread = |origin: i32, delta: i32| {
                if delta > offset + min_radius {
                    origin + delta - offset
                } else {
                    origin - delta + min_radius
                }
            };
            let destination = Position::new(
                spread(leader.position.x, x1),
                spread(leader.position.y, y1),
                leader.position.z,
            );
            self.move_to(destination);
        } else if self.rng().below(config.random_walk_rate) == 0 {
            self.try_self_buffs(template);
        }
    }

    /// Casts the first missing BUFF-scope self-buff. True when one was cast.
    pub(crate) fn try_self_buffs(&mut self, template: &ActorTemplate) -> bool {
        for skill in template.skills.scope(SkillScope::Buff) {
            if self.me.effects.has_skill(skill.id) || !self.check_cast_conditions(skill) {
                continue;
            }
            self.cast_on(skill, self.id());
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActorId, FactionId, NpcInfo, Order, ScriptedRng, Skill, SkillBook, SkillFlags, SkillId,
        TargetType,
    };

    use super::*;
    use crate::ai::Spawn;
    use crate::ai::testing::Fixture;

    fn think(fx: &Fixture, brain: &mut crate::ai::Brain) {
        brain.intention = Intention::Active;
        fx.with_think(brain, |think| think.think_active());
    }

    #[test]
    fn global_aggro_grace_delays_noticing() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let mut brain = fx.brain();
        brain.global_aggro = -2;

        think(&fx, &mut brain);
        assert_eq!(brain.global_aggro(), -1);
        assert!(brain.threat().is_empty());

        think(&fx, &mut brain);
        assert_eq!(brain.global_aggro(), 0);
        assert_eq!(brain.threat().hate_of(Fixture::PLAYER), 1);
        assert_eq!(brain.intention(), Intention::Attack { target: Fixture::PLAYER });
        assert!(fx.character(Fixture::ACTOR).is_running());
    }

    #[test]
    fn negative_global_aggro_holds_back_the_attack() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let mut brain = fx.brain();
        brain.global_aggro = -5;
        brain.threat.add(Fixture::PLAYER, 0, 3);

        think(&fx, &mut brain);
        assert_eq!(brain.intention(), Intention::Active);
    }

    #[test]
    fn forgetting_needs_full_health_and_a_lucky_roll() {
        let fx = Fixture::new().with_rng(ScriptedRng::constant(0));
        let mut brain = fx.brain();
        brain.global_aggro = -10;
        brain.threat.add(ActorId(101), 0, 5);
        brain.attacked_by.push(ActorId(101));
        brain.fallen_minions.push(ActorId(7));

        fx.world
            .update(Fixture::ACTOR, |c| c.hp.current -= 1)
            .unwrap();
        think(&fx, &mut brain);
        assert!(!brain.threat().is_empty());

        fx.world
            .update(Fixture::ACTOR, |c| c.hp.current += 1)
            .unwrap();
        think(&fx, &mut brain);
        assert!(brain.threat().is_empty());
        assert!(brain.attacked_by().is_empty());
        assert!(brain.fallen_minions().is_empty());
    }

    #[test]
    fn guards_walk_home() {
        let guard = ActorTemplate::new("guard", Role::Guard);
        let fx = Fixture::new().with_template(guard);
        let mut brain = fx.brain();
        think(&fx, &mut brain);
        assert_eq!(
            fx.world.orders_of(Fixture::ACTOR),
            vec![Order::ReturnHome {
                actor: Fixture::ACTOR
            }]
        );
    }

    #[test]
    fn wander_stays_inside_the_drift_range() {
        let fx = Fixture::new().with_rng(ScriptedRng::constant(0));
        let mut brain = fx.brain();
        think(&fx, &mut brain);

        let range = fx.config.max_drift_range;
        let me = fx.character(Fixture::ACTOR);
        assert_eq!(me.position, Position::new(-range, -range, 0));
        assert_eq!(brain.intention(), Intention::Active);
    }

    #[test]
    fn wander_buffs_first() {
        let might = Skill::new(SkillId(10), "Might", TargetType::Caster)
            .with_flags(SkillFlags::CONTINUOUS);
        let template = ActorTemplate::new("orc", Role::Monster)
            .with_skills(SkillBook::new().with(SkillScope::Buff, might));
        let fx = Fixture::new()
            .with_template(template)
            .with_rng(ScriptedRng::constant(0));
        let mut brain = fx.brain();

        think(&fx, &mut brain);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(10), Fixture::ACTOR)]);
        assert_eq!(fx.character(Fixture::ACTOR).position, Position::default());
    }

    #[test]
    fn drifted_fixed_spawn_returns_home() {
        let fx = Fixture::new().with_rng(ScriptedRng::constant(0));
        fx.world.set_home(Fixture::ACTOR, Position::new(1000, 0, 0));
        let mut brain = fx
            .brain()
            .with_spawn(Spawn::fixed(Position::new(1000, 0, 0)));
        think(&fx, &mut brain);
        assert_eq!(fx.character(Fixture::ACTOR).position, Position::new(1000, 0, 0));
    }

    #[test]
    fn territorial_wander_takes_one_step_toward_far_points() {
        let fx = Fixture::new().with_rng(ScriptedRng::constant(0));
        fx.world
            .set_territory(Fixture::ACTOR, vec![Position::new(3000, 0, 0)]);
        let mut brain = fx.brain().with_spawn(Spawn::territory(Position::default()));
        think(&fx, &mut brain);
        let range = fx.config.max_drift_range;
        assert_eq!(fx.character(Fixture::ACTOR).position, Position::new(range, 0, 0));
    }

    #[test]
    fn minion_catches_up_with_its_leader() {
        let fx = Fixture::new()
            .with_rng(ScriptedRng::constant(0))
            .with_character(Character::npc(
                ActorId(50),
                NpcInfo::monster(vec![FactionId(1)]),
                Position::new(2000, 0, 0),
            ));
        let mut brain = fx.brain().with_leader(ActorId(50));
        think(&fx, &mut brain);

        let me = fx.character(Fixture::ACTOR);
        let leash = fx.config.minion_leash_range;
        assert!(me.position.within(&Position::new(2000, 0, 0), 2 * leash));
    }

    #[test]
    fn confused_actor_keeps_its_current_target() {
        let fx = Fixture::new()
            .with_player(Position::new(200, 0, 0))
            .with_character(Character::player(ActorId(101), Position::new(150, 0, 0)));
        fx.world
            .update(Fixture::ACTOR, |c| c.conditions.insert(Conditions::CONFUSED))
            .unwrap();
        let mut brain = fx.brain();
        brain.global_aggro = 0;
        brain.threat.add(Fixture::PLAYER, 0, 50);
        brain.threat.add(ActorId(101), 0, 5);
        brain.attack_target = Some(ActorId(101));

        think(&fx, &mut brain);
        assert_eq!(brain.intention(), Intention::Attack { target: ActorId(101) });
    }
}
