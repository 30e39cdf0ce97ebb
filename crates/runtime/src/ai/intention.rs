//! Intention transitions and the CAST behavior.

use combat_core::{ActorId, Intention, SkillId, SkillScope};
use tracing::debug;

use super::ThinkError;
use super::context::Think;

/// Distance kept from a followed character.
const FOLLOW_OFFSET: i32 = 70;

impl Think<'_> {
    /// Requests an intention change with its entry effects.
    ///
    /// IDLE and ACTIVE are coerced to ACTIVE while the actor is alive and
    /// either watched by players or pulled past its leash.
    pub(crate) fn set_intention(&mut self, requested: Intention) {
        let mut intention = requested;
        if matches!(intention, Intention::Idle | Intention::Active) && !self.me.is_dead() {
            let leashed = self.brain.spawn.is_some_and(|spawn| {
                !spawn
                    .point
                    .within(&self.me.position, self.config().leash_range())
            });
            if leashed || self.world().has_visible_players(self.id()) {
                intention = Intention::Active;
            }
        }

        if self.brain.intention != intention {
            debug!(
                target: "runtime::ai",
                actor = %self.id(),
                from = %self.brain.intention.kind(),
                to = %intention.kind(),
                "intention changed"
            );
        }
        self.brain.intention = intention;

        match intention {
            Intention::Idle => self.brain.attack_target = None,
            Intention::Active | Intention::Cast { .. } => {}
            Intention::Attack { target } => {
                self.brain.attack_target = Some(target);
                self.brain.attack_timeout = self.now + self.config().attack_timeout_ticks;
                self.buff_on_engage();
            }
            Intention::MoveTo { destination } => self.move_to(destination),
            Intention::Follow { target } => self.move_to_pawn(target, FOLLOW_OFFSET),
        }
    }

    /// Switches the attack target without re-running ATTACK entry effects.
    pub(crate) fn retarget(&mut self, target: ActorId) {
        self.brain.attack_target = Some(target);
        if let Intention::Attack { .. } = self.brain.intention {
            self.brain.intention = Intention::Attack { target };
        }
    }

    /// Self-buff on entering ATTACK, gated to one attempt per recast window.
    fn buff_on_engage(&mut self) {
        let regate = self.config().buff_regate_ticks;
        if self
            .brain
            .last_buff_tick
            .is_some_and(|last| last.saturating_add(regate) >= self.now)
        {
            return;
        }
        self.brain.last_buff_tick = Some(self.now);

        let template = self.template();
        for skill in template.skills.scope(SkillScope::Buff) {
            if self.check_cast_conditions(skill) && !self.me.effects.has_skill(skill.id) {
                self.cast_on(skill, self.id());
                break;
            }
        }
    }

    /// CAST: approach the target, cast once in range, then go back to ACTIVE.
    pub(crate) fn think_cast(&mut self, skill: SkillId, target: ActorId) -> Result<(), ThinkError> {
        let template = self.template();
        let skill = template.skills.find(skill).ok_or(ThinkError::UnknownSkill {
            actor: self.id(),
            skill,
        })?;

        let Some(target) = self.character(target).filter(|t| !t.is_dead()) else {
            self.set_intention(Intention::Active);
            return Ok(());
        };

        let reach = skill.cast_range + self.combined_collision(&target);
        if !self.me.position.within(&target.position, reach) && !self.me.is_movement_disabled() {
            self.move_to_pawn(target.id, reach);
            return Ok(());
        }

        if self.check_cast_conditions(skill) && self.can_see(&target) {
            self.cast_on(skill, target.id);
        }
        self.set_intention(Intention::Active);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActorTemplate, Character, Position, Role, Skill, SkillBook, SkillFlags, TargetType,
    };

    use crate::ai::testing::Fixture;
    use crate::ai::{AiCommand, Brain, Spawn};

    use super::*;

    fn set(brain: &mut Brain, fx: &Fixture, intention: Intention) {
        brain.handle(AiCommand::SetIntention(intention), &fx.env(), &fx.peers);
    }

    #[test]
    fn idle_is_coerced_while_players_are_watching() {
        let fx = Fixture::new().with_player(Position::new(2000, 0, 0));
        let mut brain = fx.brain();
        set(&mut brain, &fx, Intention::Idle);
        assert_eq!(brain.intention(), Intention::Active);

        fx.world.remove(Fixture::PLAYER);
        set(&mut brain, &fx, Intention::Idle);
        assert_eq!(brain.intention(), Intention::Idle);
    }

    #[test]
    fn idle_is_coerced_past_the_leash() {
        let fx = Fixture::new();
        let mut brain = Brain::new(Fixture::ACTOR, fx.template.clone(), &fx.config)
            .with_spawn(Spawn::fixed(Position::new(5000, 0, 0)));
        set(&mut brain, &fx, Intention::Idle);
        assert_eq!(brain.intention(), Intention::Active);
    }

    #[test]
    fn attack_sets_timeout_and_buffs_once_per_window() {
        let might = Skill::new(SkillId(10), "Might", TargetType::Caster)
            .with_flags(SkillFlags::CONTINUOUS);
        let template = ActorTemplate::new("orc", Role::Monster)
            .with_skills(SkillBook::new().with(SkillScope::Buff, might));
        let fx = Fixture::new()
            .with_template(template)
            .with_player(Position::new(100, 0, 0));
        let mut brain = fx.brain();

        fx.clock.set(50);
        set(&mut brain, &fx, Intention::Attack { target: Fixture::PLAYER });
        assert_eq!(brain.attack_timeout(), 50 + fx.config.attack_timeout_ticks);
        assert_eq!(brain.attack_target(), Some(Fixture::PLAYER));
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(10), Fixture::ACTOR)]);

        // Buff worn off, but the recast window is still closed.
        fx.world
            .update(Fixture::ACTOR, |c| c.effects.remove(SkillId(10)))
            .unwrap();
        fx.clock.set(70);
        set(&mut brain, &fx, Intention::Active);
        set(&mut brain, &fx, Intention::Attack { target: Fixture::PLAYER });
        assert_eq!(fx.casts_of(Fixture::ACTOR).len(), 1);

        fx.clock.set(81);
        set(&mut brain, &fx, Intention::Attack { target: Fixture::PLAYER });
        assert_eq!(fx.casts_of(Fixture::ACTOR).len(), 2);
    }

    #[test]
    fn cast_intention_with_lost_target_reverts_to_active() {
        let bolt = Skill::new(SkillId(11), "Bolt", TargetType::One).with_ranges(600, 0);
        let template = ActorTemplate::new("orc", Role::Monster)
            .with_skills(SkillBook::new().with(SkillScope::LongRange, bolt));
        let fx = Fixture::new()
            .with_template(template)
            .with_player(Position::new(100, 0, 0));
        let mut brain = fx.brain();
        set(
            &mut brain,
            &fx,
            Intention::Cast {
                skill: SkillId(11),
                target: ActorId(999),
            },
        );
        brain.think(&fx.env(), &fx.peers);
        assert_eq!(brain.intention(), Intention::Active);
    }

    #[test]
    fn cast_intention_casts_in_range() {
        let bolt = Skill::new(SkillId(11), "Bolt", TargetType::One).with_ranges(600, 0);
        let template = ActorTemplate::new("orc", Role::Monster)
            .with_skills(SkillBook::new().with(SkillScope::LongRange, bolt));
        let fx = Fixture::new()
            .with_template(template)
            .with_player(Position::new(300, 0, 0));
        let mut brain = fx.brain();
        set(
            &mut brain,
            &fx,
            Intention::Cast {
                skill: SkillId(11),
                target: Fixture::PLAYER,
            },
        );
        brain.think(&fx.env(), &fx.peers);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(11), Fixture::PLAYER)]);
        assert_eq!(brain.intention(), Intention::Active);
    }

    #[test]
    fn unknown_cast_skill_is_a_think_error() {
        let fx = Fixture::new().with_player(Position::new(300, 0, 0));
        let mut brain = fx.brain();
        set(
            &mut brain,
            &fx,
            Intention::Cast {
                skill: SkillId(77),
                target: Fixture::PLAYER,
            },
        );
        let outcome = brain.think(&fx.env(), &fx.peers);
        assert!(matches!(
            outcome,
            crate::ai::ThinkOutcome::Failed(ThinkError::UnknownSkill { .. })
        ));
    }

    #[test]
    fn move_to_resolves_to_active_once_stopped() {
        let fx = Fixture::new().with_player(Position::new(300, 0, 0));
        let mut brain = fx.brain();
        let destination = Position::new(40, 40, 0);
        set(&mut brain, &fx, Intention::MoveTo { destination });
        let me: Character = fx.character(Fixture::ACTOR);
        assert_eq!(me.position, destination);

        brain.think(&fx.env(), &fx.peers);
        assert_eq!(brain.intention(), Intention::Active);
    }
}
