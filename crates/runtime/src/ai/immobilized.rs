//! What a rooted actor does instead of chasing its target.

use combat_core::{Character, Conditions, SkillScope};

use super::context::Think;

impl Think<'_> {
    /// Casts from the scope ladder a roll opens up, melees a target already
    /// in reach, or looks for a reachable target.
    ///
    /// Lower rolls open more rungs: below 15 every control scope is tried,
    /// from 30 to 39 only NEGATIVE.
    pub(crate) fn immobilized_fallback(&mut self, target: &Character) {
        let template = self.template();
        let roll = self.rng().below(100);

        let mut ladder = Vec::with_capacity(6);
        if roll < 15 && !target.has(Conditions::IMMOBILIZED) {
            ladder.push(SkillScope::Immobilize);
        }
        if roll < 20 {
            ladder.push(SkillScope::Cot);
        }
        if roll < 30 {
            ladder.push(SkillScope::Debuff);
        }
        if roll < 40 {
            ladder.push(SkillScope::Negative);
        }
        if self.me.is_movement_disabled() || template.archetype.is_caster() {
            ladder.push(SkillScope::Attack);
        }
        ladder.push(SkillScope::Universal);

        for scope in ladder {
            if self.try_scope_cast(scope, target) {
                return;
            }
        }

        let reach = template.physical_attack_range + self.combined_collision(target);
        if self.distance_to(target) <= reach && self.can_see(target) {
            self.combat().attack(self.id(), target.id);
        } else {
            self.target_reconsider();
        }
    }

    /// First skill of `scope` that can land on `target` from here.
    fn try_scope_cast(&mut self, scope: SkillScope, target: &Character) -> bool {
        let template = self.template();
        let distance = self.distance_to(target);
        let collisions = self.combined_collision(target);
        for skill in template.skills.scope(scope) {
            let in_range = skill.target.is_aura() || skill.cast_range + collisions > distance;
            if self.check_cast_conditions(skill)
                && in_range
                && !target.effects.has_skill(skill.id)
                && self.can_see(target)
            {
                self.cast_on(skill, target.id);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActorId, ActorTemplate, Capabilities, Position, Role, ScriptedRng, Skill, SkillBook,
        SkillFlags, SkillId, TargetType,
    };

    use super::*;
    use crate::ai::testing::Fixture;

    fn rooted(skills: SkillBook, roll: u32, player_at: i32) -> Fixture {
        let template = ActorTemplate::new("treant", Role::Monster)
            .with_capabilities(Capabilities::AGGRESSIVE)
            .with_aggro_range(300)
            .with_skills(skills);
        let fx = Fixture::new()
            .with_template(template)
            .with_rng(ScriptedRng::constant(roll))
            .with_player(Position::new(player_at, 0, 0));
        fx.world
            .update(Fixture::ACTOR, |c| {
                c.conditions.insert(Conditions::MOVEMENT_DISABLED)
            })
            .unwrap();
        fx
    }

    fn run(fx: &Fixture) {
        let mut brain = fx.brain();
        brain.attack_target = Some(Fixture::PLAYER);
        let target = fx.character(Fixture::PLAYER);
        fx.with_think(&mut brain, |think| think.immobilized_fallback(&target));
    }

    fn curse() -> Skill {
        Skill::new(SkillId(20), "curse", TargetType::One)
            .with_ranges(600, 0)
            .with_flags(SkillFlags::CONTINUOUS | SkillFlags::DEBUFF)
    }

    #[test]
    fn debuff_roll_casts_from_the_debuff_scope() {
        let fx = rooted(SkillBook::new().with(SkillScope::Debuff, curse()), 25, 300);
        run(&fx);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(20), Fixture::PLAYER)]);
        assert!(fx.attacks_of(Fixture::ACTOR).is_empty());
    }

    #[test]
    fn low_rolls_still_reach_the_debuff_scope() {
        for roll in [5, 17] {
            let fx = rooted(SkillBook::new().with(SkillScope::Debuff, curse()), roll, 50);
            run(&fx);
            assert_eq!(
                fx.casts_of(Fixture::ACTOR),
                vec![(SkillId(20), Fixture::PLAYER)],
                "roll {roll}"
            );
            assert!(fx.attacks_of(Fixture::ACTOR).is_empty(), "roll {roll}");
        }
    }

    #[test]
    fn lowest_roll_tries_immobilize_before_debuff() {
        let snare = Skill::new(SkillId(22), "snare", TargetType::One)
            .with_ranges(600, 0)
            .with_flags(SkillFlags::CONTINUOUS | SkillFlags::DEBUFF);
        let fx = rooted(
            SkillBook::new()
                .with(SkillScope::Debuff, curse())
                .with(SkillScope::Immobilize, snare),
            5,
            300,
        );
        run(&fx);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(22), Fixture::PLAYER)]);
    }

    #[test]
    fn high_roll_falls_through_to_the_attack_scope() {
        let strike = Skill::new(SkillId(21), "strike", TargetType::One).with_ranges(500, 0);
        let fx = rooted(
            SkillBook::new()
                .with(SkillScope::Debuff, curse())
                .with(SkillScope::Attack, strike),
            80,
            300,
        );
        run(&fx);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(21), Fixture::PLAYER)]);
    }

    #[test]
    fn melee_when_nothing_castable_and_in_reach() {
        let fx = rooted(SkillBook::new(), 80, 50);
        run(&fx);
        assert_eq!(fx.attacks_of(Fixture::ACTOR), vec![Fixture::PLAYER]);
    }

    #[test]
    fn out_of_reach_reconsiders() {
        let fx = rooted(SkillBook::new(), 80, 500)
            .with_character(Character::player(ActorId(101), Position::new(40, 0, 0)));
        let mut brain = fx.brain();
        brain.attack_target = Some(Fixture::PLAYER);
        let target = fx.character(Fixture::PLAYER);
        fx.with_think(&mut brain, |think| think.immobilized_fallback(&target));

        assert!(fx.attacks_of(Fixture::ACTOR).is_empty());
        assert_eq!(brain.attack_target(), Some(ActorId(101)));
    }
}
