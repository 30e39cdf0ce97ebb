//! Skill selection engine.
//!
//! [`Think::try_cast`] decides whether a single skill can be used this tick
//! and on whom, branching on the skill's effect tags. Each branch either
//! casts, moves the actor into range, or falls through to the next branch;
//! a skill nothing applies to is declined.

use combat_core::{ActorId, Character, Conditions, EffectSet, Role, Skill, TargetType};
use tracing::trace;

use super::context::Think;
use super::reconsider::EffectMode;

/// Result of one skill attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastAttempt {
    Cast,
    /// A move into cast range was issued instead of the cast.
    Moving,
    Declined,
}

impl CastAttempt {
    /// The attempt used up the actor's turn.
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Declined)
    }
}

/// Distances a cast decision is made from.
struct Geometry {
    /// Cast range plus own collision.
    srange: i32,
    /// Distance to the target's edge, shortened for a moving target.
    dist2: i32,
    /// Physical attack range plus both collisions.
    range: i32,
}

impl Think<'_> {
    /// Resource, cooldown and silence checks shared by every cast.
    pub(crate) fn check_cast_conditions(&self, skill: &Skill) -> bool {
        let silenced = if skill.is_magic() {
            self.me.has(Conditions::MUTED)
        } else {
            self.me.has(Conditions::PHYSICAL_MUTED)
        };
        skill.mp_cost < self.me.mp.current
            && !self.me.is_skill_disabled(skill.id)
            && (skill.is_static() || !silenced)
            && (!self.me.has(Conditions::CASTING) || skill.is_simultaneous())
    }

    /// Stops and casts. Self and party skills always land on the caster.
    pub(crate) fn cast_on(&mut self, skill: &Skill, target: ActorId) -> CastAttempt {
        let target = if skill.is_self() || skill.is_party() {
            self.id()
        } else {
            target
        };
        trace!(target: "runtime::ai", actor = %self.id(), skill = %skill.name, %target, "cast");
        self.combat().stop_moving(self.id());
        self.combat().cast(self.id(), skill, target);
        self.refresh();
        CastAttempt::Cast
    }

    /// Tries `skill` against `target`, or against the current attack target
    /// when none is given.
    pub(crate) fn try_cast(&mut self, skill: &Skill, target: Option<&Character>) -> CastAttempt {
        if !self.check_cast_conditions(skill) {
            return CastAttempt::Declined;
        }
        let target = match target {
            Some(target) => Some(target.clone()),
            None => self.brain.attack_target.and_then(|id| self.character(id)),
        };
        let target = target.as_ref();
        let geometry = self.geometry(skill, target);

        let attempt = self
            .buff_branch(skill)
            .or_else(|| self.debuff_branch(skill, target, &geometry))
            .or_else(|| self.dispel_branch(skill, target, &geometry))
            .or_else(|| self.heal_branch(skill))
            .or_else(|| self.damage_branch(skill, target, &geometry))
            .or_else(|| self.sleep_branch(skill, target, &geometry))
            .or_else(|| self.control_branch(skill, target, &geometry))
            .or_else(|| self.resurrection_branch(skill))
            .or_else(|| self.fallback_branch(skill, target, &geometry));
        attempt.unwrap_or(CastAttempt::Declined)
    }

    fn geometry(&self, skill: &Skill, target: Option<&Character>) -> Geometry {
        let srange = skill.cast_range + self.me.collision_radius;
        match target {
            Some(target) => {
                let mut dist2 = self.distance_to(target) - target.collision_radius;
                if target.is_moving() {
                    dist2 -= 30;
                }
                Geometry {
                    srange,
                    dist2,
                    range: self.template().physical_attack_range + self.combined_collision(target),
                }
            }
            None => Geometry {
                srange,
                dist2: i32::MAX,
                range: 0,
            },
        }
    }

    /// Live, visible and inside cast range.
    fn reachable(&self, target: &Character, geometry: &Geometry) -> bool {
        !target.is_dead() && self.can_see(target) && geometry.dist2 <= geometry.srange
    }

    /// Continuous non-debuff (buffs).
    fn buff_branch(&mut self, skill: &Skill) -> Option<CastAttempt> {
        if !skill.is_continuous() || skill.is_debuff() {
            return None;
        }
        if !self.me.effects.has_skill(skill.id) {
            return Some(self.cast_on(skill, self.id()));
        }
        match skill.target {
            TargetType::Caster => Some(CastAttempt::Declined),
            TargetType::One => {
                let ally = self.effect_target(skill, EffectMode::Positive)?;
                Some(self.cast_on(skill, ally.id))
            }
            TargetType::Party | TargetType::Clan => {
                let needs = |ally: &Character| !ally.effects.has_skill(skill.id);
                self.party_member(skill, needs)
                    .map(|_| self.cast_on(skill, self.id()))
            }
            _ => None,
        }
    }

    /// Continuous debuff. The AOE variant has no targeting and is skipped.
    fn debuff_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if !skill.is_continuous() || !skill.is_debuff() {
            return None;
        }
        if let Some(target) = target
            && !skill.is_aoe()
            && self.reachable(target, geometry)
        {
            if target.effects.has_skill(skill.id) {
                return None;
            }
            return Some(self.cast_on(skill, target.id));
        }
        if skill.is_aoe() {
            return None;
        }
        if skill.target == TargetType::One {
            let victim = self.effect_target(skill, EffectMode::Negative)?;
            return Some(self.cast_on(skill, victim.id));
        }
        None
    }

    /// Dispel. The AOE variant has no targeting and is skipped.
    fn dispel_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::DISPEL) || skill.target != TargetType::One {
            return None;
        }
        if let Some(target) = target
            && target.effects.has_removable_buff()
            && self.reachable(target, geometry)
        {
            return Some(self.cast_on(skill, target.id));
        }
        let victim = self.effect_target(skill, EffectMode::Dispel)?;
        Some(self.cast_on(skill, victim.id))
    }

    /// Minion heals its leader, then itself, then hurt faction members.
    fn heal_branch(&mut self, skill: &Skill) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::HEAL) {
            return None;
        }
        if skill.target != TargetType::Caster
            && let Some(leader) = self.live_leader()
            && self.rng().below(100) > leader.hp.percent() as u32
        {
            if let Some(attempt) = self.support_leader(skill, &leader) {
                return Some(attempt);
            }
        }

        let missing = (100 - self.me.hp.percent()).max(0) as u32;
        if self.rng().below(100) < missing / 3 {
            return Some(self.cast_on(skill, self.id()));
        }

        if skill.target == TargetType::One {
            let radius = skill.cast_range + self.me.collision_radius;
            let template = self.template();
            for ally in self.world().known_characters(self.id(), radius) {
                if ally.is_dead()
                    || !ally.is_attackable_npc()
                    || !ally.shares_faction(&template.factions)
                {
                    continue;
                }
                let missing = (100 - ally.hp.percent()).max(0) as u32;
                if self.rng().below(100) < missing / 10 && self.can_see(&ally) {
                    return Some(self.cast_on(skill, ally.id));
                }
            }
        }

        if skill.is_party() {
            let hurt = |ally: &Character| !ally.is_dead() && !ally.hp.is_full();
            if self.party_member(skill, hurt).is_some() && self.rng().below(100) <= 20 {
                return Some(self.cast_on(skill, self.id()));
            }
        }
        None
    }

    /// Direct damage and drain. Auras go off immediately.
    fn damage_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::DAMAGE) {
            return None;
        }
        if skill.target.is_aura() {
            return Some(self.cast_on(skill, self.id()));
        }
        if let Some(target) = target
            && self.reachable(target, geometry)
        {
            return Some(self.cast_on(skill, target.id));
        }
        let other = self.skill_target(skill)?;
        Some(self.cast_on(skill, other.id))
    }

    /// Sleep only targets what is out of melee range or running.
    fn sleep_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::SLEEP) {
            return None;
        }
        if skill.target == TargetType::One {
            if let Some(target) = target
                && !target.is_dead()
                && geometry.dist2 <= geometry.srange
                && (geometry.dist2 > geometry.range || target.is_moving())
                && !target.effects.has_skill(skill.id)
            {
                return Some(self.cast_on(skill, target.id));
            }
            let victim = self.effect_target(skill, EffectMode::Negative)?;
            return Some(self.cast_on(skill, victim.id));
        }
        self.aoe_cast(skill, target, geometry)
    }

    /// Crowd control and damage over time.
    fn control_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::CROWD_CONTROL | EffectSet::DAMAGE_OVER_TIME) {
            return None;
        }
        if let Some(target) = target
            && !skill.is_aoe()
            && self.can_see(target)
            && geometry.dist2 <= geometry.srange
            && !target.effects.has_skill(skill.id)
        {
            return Some(self.cast_on(skill, target.id));
        }
        if skill.is_aoe() {
            return self.aoe_cast(skill, target, geometry);
        }
        if skill.target == TargetType::One {
            let victim = self.effect_target(skill, EffectMode::Negative)?;
            return Some(self.cast_on(skill, victim.id));
        }
        None
    }

    /// Auras always fire; areas fire on a target inside cast range.
    fn aoe_cast(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if skill.target.is_aura() {
            return Some(self.cast_on(skill, self.id()));
        }
        if skill.target.is_area() {
            let target = target.filter(|_| geometry.dist2 <= geometry.srange)?;
            return Some(self.cast_on(skill, target.id));
        }
        None
    }

    /// Minion raises its leader, then dead faction members nearby.
    fn resurrection_branch(&mut self, skill: &Skill) -> Option<CastAttempt> {
        if !skill.has_any(EffectSet::RESURRECTION) {
            return None;
        }
        if skill.is_party() {
            let fallen = |ally: &Character| ally.is_dead();
            if self.party_member(skill, fallen).is_some() && self.rng().below(100) <= 20 {
                return Some(self.cast_on(skill, self.id()));
            }
            return None;
        }

        if let Some(leader) = self.leader_character().filter(Character::is_dead)
            && let Some(attempt) = self.support_leader(skill, &leader)
        {
            return Some(attempt);
        }

        let radius = skill.cast_range + self.me.collision_radius;
        let template = self.template();
        for ally in self.world().known_characters(self.id(), radius) {
            if !ally.is_dead()
                || !ally.is_attackable_npc()
                || !ally.shares_faction(&template.factions)
            {
                continue;
            }
            if self.rng().below(100) < 10 && self.can_see(&ally) {
                return Some(self.cast_on(skill, ally.id));
            }
        }
        None
    }

    /// Skills with no effect tag the engine knows.
    fn fallback_branch(
        &mut self,
        skill: &Skill,
        target: Option<&Character>,
        geometry: &Geometry,
    ) -> Option<CastAttempt> {
        if skill.has_recognized_effect() {
            return None;
        }
        if skill.target.is_aura() {
            return Some(self.cast_on(skill, self.id()));
        }
        if let Some(target) = target
            && self.reachable(target, geometry)
        {
            return Some(self.cast_on(skill, target.id));
        }
        let other = self.skill_target(skill)?;
        Some(self.cast_on(skill, other.id))
    }

    /// Walk to the leader or cast on it.
    fn support_leader(&mut self, skill: &Skill, leader: &Character) -> Option<CastAttempt> {
        let reach = skill.cast_range + self.combined_collision(leader);
        if !self.me.position.within(&leader.position, reach)
            && !skill.is_party()
            && !self.me.is_movement_disabled()
        {
            self.move_to_pawn(leader.id, reach);
            return Some(CastAttempt::Moving);
        }
        if self.can_see(leader) {
            return Some(self.cast_on(skill, leader.id));
        }
        None
    }

    /// Leader snapshot when the actor is a minion.
    fn leader_character(&self) -> Option<Character> {
        let is_minion = self.brain.leader.is_some() || self.template().role == Role::Minion;
        if !is_minion {
            return None;
        }
        self.brain.leader.and_then(|id| self.character(id))
    }

    fn live_leader(&self) -> Option<Character> {
        self.leader_character().filter(|leader| !leader.is_dead())
    }

    /// First faction member inside the skill's affect range matching `wanted`.
    fn party_member(
        &self,
        skill: &Skill,
        wanted: impl Fn(&Character) -> bool,
    ) -> Option<Character> {
        let template = self.template();
        let radius = skill.affect_range + self.me.collision_radius;
        self.world()
            .known_characters(self.id(), radius)
            .into_iter()
            .filter(|ally| ally.is_attackable_npc() && ally.shares_faction(&template.factions))
            .find(|ally| wanted(ally))
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        ActiveEffect, Conditions, FactionId, NpcInfo, Position, ScriptedRng, SkillFlags, SkillId,
    };

    use super::*;
    use crate::ai::testing::Fixture;

    fn skill(id: u32, target: TargetType) -> Skill {
        Skill::new(SkillId(id), format!("skill-{id}"), target).with_ranges(600, 150)
    }

    fn engaged(fx: &Fixture) -> crate::ai::Brain {
        let mut brain = fx.brain();
        brain.attack_target = Some(Fixture::PLAYER);
        brain
    }

    #[test]
    fn silenced_channel_blocks_the_cast() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        fx.world
            .update(Fixture::ACTOR, |c| c.conditions.insert(Conditions::MUTED))
            .unwrap();
        let bolt = skill(1, TargetType::One)
            .with_flags(SkillFlags::MAGIC)
            .with_effects(EffectSet::MAGICAL_ATTACK);
        let strike = skill(2, TargetType::One).with_effects(EffectSet::PHYSICAL_ATTACK);
        let mut brain = engaged(&fx);

        assert_eq!(fx.try_cast(&mut brain, &bolt, None), CastAttempt::Declined);
        assert_eq!(fx.try_cast(&mut brain, &strike, None), CastAttempt::Cast);

        let static_bolt = bolt.with_flags(SkillFlags::STATIC);
        assert!(static_bolt.is_magic());
        assert_eq!(fx.try_cast(&mut brain, &static_bolt, None), CastAttempt::Cast);
    }

    #[test]
    fn cooldown_and_mana_block_the_cast() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let strike = skill(2, TargetType::One).with_effects(EffectSet::PHYSICAL_ATTACK);
        let mut brain = engaged(&fx);

        fx.world
            .update(Fixture::ACTOR, |c| c.disabled_skills.push(SkillId(2)))
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &strike, None), CastAttempt::Declined);

        fx.world
            .update(Fixture::ACTOR, |c| {
                c.disabled_skills.clear();
                c.mp.current = 10;
            })
            .unwrap();
        let costly = strike.with_mp_cost(10);
        assert_eq!(fx.try_cast(&mut brain, &costly, None), CastAttempt::Declined);
    }

    #[test]
    fn buff_lands_on_self_first() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let shield = skill(3, TargetType::One).with_flags(SkillFlags::CONTINUOUS);
        let mut brain = engaged(&fx);

        assert_eq!(fx.try_cast(&mut brain, &shield, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(3), Fixture::ACTOR)]);

        // Already buffed and no unbuffed ally around.
        assert_eq!(fx.try_cast(&mut brain, &shield, None), CastAttempt::Declined);
    }

    #[test]
    fn buff_moves_on_to_unbuffed_faction_ally() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        fx.world
            .insert(Character::npc(
                ActorId(2),
                NpcInfo::monster(vec![FactionId(1)]),
                Position::new(100, 0, 0),
            ))
            .unwrap();
        let shield = skill(3, TargetType::One).with_flags(SkillFlags::CONTINUOUS);
        let mut brain = engaged(&fx);

        fx.try_cast(&mut brain, &shield, None);
        fx.try_cast(&mut brain, &shield, None);
        assert_eq!(
            fx.casts_of(Fixture::ACTOR),
            vec![(SkillId(3), Fixture::ACTOR), (SkillId(3), ActorId(2))]
        );
    }

    #[test]
    fn debuff_skips_an_already_affected_target() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let curse = skill(4, TargetType::One)
            .with_flags(SkillFlags::CONTINUOUS | SkillFlags::DEBUFF);
        let mut brain = engaged(&fx);

        assert_eq!(fx.try_cast(&mut brain, &curse, None), CastAttempt::Cast);
        assert_eq!(fx.try_cast(&mut brain, &curse, None), CastAttempt::Declined);
    }

    #[test]
    fn aoe_debuff_is_not_targeted() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let miasma = skill(5, TargetType::Area)
            .with_flags(SkillFlags::CONTINUOUS | SkillFlags::DEBUFF);
        let mut brain = engaged(&fx);
        assert_eq!(fx.try_cast(&mut brain, &miasma, None), CastAttempt::Declined);
    }

    #[test]
    fn out_of_range_damage_falls_back_to_a_threat_entry() {
        let fx = Fixture::new()
            .with_player(Position::new(2000, 0, 0))
            .with_character(Character::player(ActorId(101), Position::new(300, 0, 0)));
        let bolt = skill(6, TargetType::One).with_effects(EffectSet::MAGICAL_ATTACK);
        let mut brain = engaged(&fx);
        brain.threat.add(ActorId(101), 0, 5);

        assert_eq!(fx.try_cast(&mut brain, &bolt, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(6), ActorId(101))]);
    }

    #[test]
    fn aura_damage_fires_without_a_target_in_range() {
        let fx = Fixture::new().with_player(Position::new(2000, 0, 0));
        let quake = skill(7, TargetType::Aura).with_effects(EffectSet::PHYSICAL_ATTACK);
        let mut brain = engaged(&fx);
        assert_eq!(fx.try_cast(&mut brain, &quake, None), CastAttempt::Cast);
    }

    #[test]
    fn sleep_ignores_targets_in_melee_range() {
        let fx = Fixture::new().with_player(Position::new(50, 0, 0));
        let lullaby = skill(8, TargetType::One)
            .with_flags(SkillFlags::CONTINUOUS | SkillFlags::DEBUFF)
            .with_effects(EffectSet::SLEEP);
        let mut brain = engaged(&fx);
        // Already asleep from an earlier cast so the debuff branch passes.
        fx.world
            .update(Fixture::PLAYER, |c| {
                c.effects.add(ActiveEffect {
                    skill: SkillId(8),
                    positive: false,
                    dispellable: true,
                })
            })
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &lullaby, None), CastAttempt::Declined);
    }

    #[test]
    fn minion_walks_to_a_hurt_leader_before_healing() {
        let fx = Fixture::new()
            .with_player(Position::new(200, 0, 0))
            .with_character(
                Character::npc(
                    ActorId(50),
                    NpcInfo::monster(vec![FactionId(1)]),
                    Position::new(1500, 0, 0),
                )
                .with_hp(100, 1000),
            );
        let heal = skill(9, TargetType::One).with_effects(EffectSet::HEAL);
        let mut brain = fx.brain().with_leader(ActorId(50));

        assert_eq!(fx.try_cast(&mut brain, &heal, None), CastAttempt::Moving);
        assert_eq!(fx.try_cast(&mut brain, &heal, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(9), ActorId(50))]);
    }

    #[test]
    fn unrecognized_skill_uses_the_fallback() {
        let fx = Fixture::new().with_player(Position::new(200, 0, 0));
        let odd = skill(12, TargetType::One);
        let mut brain = engaged(&fx);
        assert_eq!(fx.try_cast(&mut brain, &odd, None), CastAttempt::Cast);
    }

    fn removable_buff(id: u32) -> ActiveEffect {
        ActiveEffect {
            skill: SkillId(id),
            positive: true,
            dispellable: true,
        }
    }

    #[test]
    fn dispel_goes_after_removable_buffs() {
        let fx = Fixture::new()
            .with_player(Position::new(200, 0, 0))
            .with_character(Character::player(ActorId(101), Position::new(300, 0, 0)));
        let purge = skill(13, TargetType::One).with_effects(EffectSet::DISPEL);
        let mut brain = engaged(&fx);
        brain.attacked_by.push(ActorId(101));

        assert_eq!(fx.try_cast(&mut brain, &purge, None), CastAttempt::Declined);

        fx.world
            .update(ActorId(101), |c| c.effects.add(removable_buff(50)))
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &purge, None), CastAttempt::Cast);

        fx.world
            .update(Fixture::PLAYER, |c| c.effects.add(removable_buff(51)))
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &purge, None), CastAttempt::Cast);
        assert_eq!(
            fx.casts_of(Fixture::ACTOR),
            vec![(SkillId(13), ActorId(101)), (SkillId(13), Fixture::PLAYER)]
        );
    }

    #[test]
    fn control_moves_on_once_the_target_is_affected() {
        let fx = Fixture::new()
            .with_player(Position::new(200, 0, 0))
            .with_character(Character::player(ActorId(101), Position::new(300, 0, 0)));
        let stun = skill(14, TargetType::One).with_effects(EffectSet::STUN);
        let mut brain = engaged(&fx);
        brain.attacked_by.push(ActorId(101));

        assert_eq!(fx.try_cast(&mut brain, &stun, None), CastAttempt::Cast);
        fx.world
            .update(Fixture::PLAYER, |c| {
                c.effects.add(ActiveEffect {
                    skill: SkillId(14),
                    positive: false,
                    dispellable: true,
                })
            })
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &stun, None), CastAttempt::Cast);
        assert_eq!(
            fx.casts_of(Fixture::ACTOR),
            vec![(SkillId(14), Fixture::PLAYER), (SkillId(14), ActorId(101))]
        );
    }

    #[test]
    fn area_damage_over_time_waits_for_the_target() {
        let fx = Fixture::new().with_player(Position::new(2000, 0, 0));
        let cloud = skill(15, TargetType::Area).with_effects(EffectSet::DAMAGE_OVER_TIME);
        let mut brain = engaged(&fx);
        assert_eq!(fx.try_cast(&mut brain, &cloud, None), CastAttempt::Declined);

        fx.world
            .update(Fixture::PLAYER, |c| c.position = Position::new(300, 0, 0))
            .unwrap();
        assert_eq!(fx.try_cast(&mut brain, &cloud, None), CastAttempt::Cast);

        let venom_aura = skill(16, TargetType::Aura).with_effects(EffectSet::DAMAGE_OVER_TIME);
        assert_eq!(fx.try_cast(&mut brain, &venom_aura, None), CastAttempt::Cast);
        assert_eq!(
            fx.casts_of(Fixture::ACTOR),
            vec![(SkillId(15), Fixture::PLAYER), (SkillId(16), Fixture::ACTOR)]
        );
    }

    fn fallen_ally(id: u32, position: Position) -> Character {
        Character::npc(ActorId(id), NpcInfo::monster(vec![FactionId(1)]), position)
            .with_hp(0, 1000)
    }

    #[test]
    fn resurrection_raises_a_fallen_faction_member() {
        let revive = skill(17, TargetType::One).with_effects(EffectSet::RESURRECTION);

        let fx = Fixture::new().with_character(fallen_ally(2, Position::new(100, 0, 0)));
        let mut brain = fx.brain();
        assert_eq!(fx.try_cast(&mut brain, &revive, None), CastAttempt::Declined);

        let fx = Fixture::new()
            .with_rng(ScriptedRng::constant(0))
            .with_character(fallen_ally(2, Position::new(100, 0, 0)));
        let mut brain = fx.brain();
        assert_eq!(fx.try_cast(&mut brain, &revive, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(17), ActorId(2))]);
    }

    #[test]
    fn minion_walks_to_its_fallen_leader_to_raise_it() {
        let fx = Fixture::new().with_character(fallen_ally(50, Position::new(1500, 0, 0)));
        let revive = skill(17, TargetType::One).with_effects(EffectSet::RESURRECTION);
        let mut brain = fx.brain().with_leader(ActorId(50));

        assert_eq!(fx.try_cast(&mut brain, &revive, None), CastAttempt::Moving);
        assert_eq!(fx.try_cast(&mut brain, &revive, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(17), ActorId(50))]);
    }

    #[test]
    fn party_resurrection_is_cast_on_self() {
        let fx = Fixture::new()
            .with_rng(ScriptedRng::constant(0))
            .with_character(fallen_ally(2, Position::new(100, 0, 0)));
        let mass_revive = skill(18, TargetType::Party).with_effects(EffectSet::RESURRECTION);
        let mut brain = fx.brain();

        assert_eq!(fx.try_cast(&mut brain, &mass_revive, None), CastAttempt::Cast);
        assert_eq!(fx.casts_of(Fixture::ACTOR), vec![(SkillId(18), Fixture::ACTOR)]);
    }
}
