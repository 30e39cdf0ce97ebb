//! ATTACK: the combat decision loop.
//!
//! After the preconditions and target checks, each cycle walks a fixed
//! priority list built as a behavior tree over an [`Engagement`]. The first
//! leaf that claims the tick wins; faction assist always runs and always
//! falls through.

use behavior_tree::{Node, Status, action, always_fail, condition, inverter, selector, sequence};
use combat_core::{
    Capabilities, Character, Conditions, Intention, Position, Role, Skill, SkillScope,
};
use tracing::debug;

use super::context::{Engagement, Think};

/// Shown to players a festival monster throws out.
const FESTIVAL_NOTICE: &str = "You are not a registered participant of this festival.";
/// Kite destinations are checked this far above ground.
const KITE_HEIGHT_CHECK: i32 = 30;
/// Random extra distance added when stepping out of a clump.
const CLUMP_SCATTER: u32 = 40;
/// Extra range allowed per moving party.
const MOVING_RANGE_BONUS: i32 = 50;
/// Approach stops this much short of a moving target's range.
const MOVING_APPROACH_LEAD: i32 = 100;
const MIN_APPROACH: i32 = 5;

impl Think<'_> {
    pub(crate) fn think_attack(&mut self) {
        if self
            .me
            .conditions
            .intersects(Conditions::CASTING | Conditions::ATTACKING)
            || self.me.has(Conditions::CORE_AI_DISABLED)
            || self.me.has(Conditions::OUT_OF_CONTROL)
        {
            return;
        }

        let Some(most) = self.brain.threat.most_hated() else {
            self.set_intention(Intention::Active);
            return;
        };
        self.retarget(most);

        let target = self.character(most).filter(|t| !t.is_dead());
        if self.me.is_movement_disabled()
            && let Some(target) = target.as_ref()
        {
            self.immobilized_fallback(target);
            return;
        }

        let Some(target) = target.filter(|_| self.now <= self.brain.attack_timeout) else {
            debug!(target: "runtime::ai", actor = %self.id(), target = %most, "giving up on target");
            self.brain.threat.remove(most);
            self.brain.attack_target = None;
            self.set_intention(Intention::Active);
            self.set_running(false);
            return;
        };

        let tree: Node<'_, Engagement<'_, '_>> = selector(vec![
            action(festival_eviction),
            always_fail(action(faction_assist)),
            action(suicide),
            action(clump),
            action(kite),
            action(chaos),
            selector(vec![
                action(heal_skills),
                action(resurrect_skills),
                sequence(vec![condition(lacks_ranged_scopes), action(general_skills)]),
                sequence(vec![condition(target_close), action(short_range_skills)]),
                sequence(vec![inverter(condition(target_close)), action(long_range_skills)]),
            ]),
            action(engage),
        ]);
        let mut engagement = Engagement { think: self, target };
        tree.tick(&mut engagement);
    }

    /// Tries `first`, then the rest of `scope`. True once one is handled.
    fn cast_ladder(&mut self, first: &Skill, scope: &[Skill], target: &Character) -> bool {
        if self.try_cast(first, Some(target)).is_handled() {
            return true;
        }
        scope
            .iter()
            .filter(|skill| skill.id != first.id)
            .any(|skill| self.try_cast(skill, Some(target)).is_handled())
    }

    /// Random skill of the scope first, then the others.
    fn cast_random(&mut self, scope: SkillScope, target: &Character) -> bool {
        let template = self.template();
        let skills = template.skills.scope(scope);
        match self.pick(skills) {
            Some(first) => self.cast_ladder(first, skills, target),
            None => false,
        }
    }
}

fn festival_eviction(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    let outsider = e
        .target
        .acting_player()
        .is_some_and(|p| !p.event_participant);
    if think.template().role != Role::FestivalMonster || !e.target.is_player() || !outsider {
        return Status::Failure;
    }
    think.combat().evict_to_town(e.target.id, FESTIVAL_NOTICE);
    think.brain.threat.remove(e.target.id);
    think.set_intention(Intention::Active);
    Status::Success
}

fn faction_assist(e: &mut Engagement<'_, '_>) -> Status {
    e.think.call_faction(&e.target);
    Status::Success
}

fn suicide(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    if think.me.hp.percent() >= think.config().suicide_hp_percent {
        return Status::Failure;
    }
    let template = think.template();
    let skills = template.skills.scope(SkillScope::Suicide);
    let Some(first) = think.pick(skills) else {
        return Status::Failure;
    };
    let reach = first.affect_range + think.combined_collision(&e.target);
    if think.distance_to(&e.target) > reach || !think.skill_chance_roll(&template) {
        return Status::Failure;
    }
    think.cast_ladder(first, skills, &e.target).into()
}

/// Steps out when another attackable stands inside the actor.
fn clump(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    if !think.rng().chance(think.config().clump_chance) {
        return Status::Failure;
    }
    let radius = think.me.collision_radius;
    let crowded = think
        .world()
        .known_characters(think.id(), radius)
        .iter()
        .any(|c| c.id != e.target.id && c.is_attackable_npc());
    if !crowded {
        return Status::Failure;
    }

    let combined = think.combined_collision(&e.target);
    let rng = think.rng();
    let scatter = |origin: i32| {
        let amount = combined + rng.below(CLUMP_SCATTER) as i32;
        if rng.coin() { origin + amount } else { origin - amount }
    };
    let at = e.target.position;
    let spot = Position::new(scatter(at.x), scatter(at.y), at.z);
    let here = think.me.position;
    if !spot.within(&here, radius)
        && think
            .world()
            .can_move(here, spot.offset(0, 0, KITE_HEIGHT_CHECK), think.me.instance)
    {
        think.move_to(spot);
    }
    Status::Success
}

/// Long-range attackers back off from targets that close in.
fn kite(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    let config = think.config();
    if think.template().physical_attack_range < config.kite_min_attack_range
        || !think.rng().chance(config.kite_chance)
    {
        return Status::Failure;
    }
    let trigger = config.kite_trigger_range + think.combined_collision(&e.target);
    if !think.me.position.within(&e.target.position, trigger) {
        return Status::Failure;
    }

    let distance = config.kite_distance;
    let away = |mine: i32, theirs: i32| if mine < theirs { -distance } else { distance };
    let here = think.me.position;
    let at = e.target.position;
    let destination = here.offset(away(here.x, at.x), away(here.y, at.y), 0);
    if think.world().can_move(
        here,
        destination.offset(0, 0, KITE_HEIGHT_CHECK),
        think.me.instance,
    ) {
        think.set_intention(Intention::MoveTo { destination });
    }
    Status::Success
}

/// Bosses and minions periodically switch to a random other threat entry.
fn chaos(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    let template = think.template();
    let config = think.config();
    let hp = think.me.hp.percent();
    let minion = template.role == Role::Minion
        || think.brain.leader.is_some()
        || template.is(Capabilities::RAID_MINION);

    let (threshold, rate) = match template.role {
        Role::RaidBoss if think.brain.minions.is_empty() => (config.raid_chaos_time, 100 - hp),
        Role::RaidBoss => (config.raid_chaos_time, 100 - 2 * hp),
        Role::GrandBoss => (config.grand_chaos_time, 100 - 3 * hp),
        _ if minion => (config.minion_chaos_time, 100 - 2 * hp),
        _ => return Status::Failure,
    };

    think.brain.chaos_time += 1;
    if think.brain.chaos_time <= threshold {
        return Status::Failure;
    }
    let roll = think.rng().below(100) as i32;
    let fires = if template.role == Role::GrandBoss && rate <= 10 {
        roll <= 10
    } else {
        roll <= rate
    };
    if !fires {
        return Status::Failure;
    }
    think.aggro_reconsider();
    think.brain.chaos_time = 0;
    Status::Success
}

fn heal_skills(e: &mut Engagement<'_, '_>) -> Status {
    cast_any(e, SkillScope::Heal)
}

fn resurrect_skills(e: &mut Engagement<'_, '_>) -> Status {
    cast_any(e, SkillScope::Res)
}

fn cast_any(e: &mut Engagement<'_, '_>, scope: SkillScope) -> Status {
    let template = e.think.template();
    template
        .skills
        .scope(scope)
        .iter()
        .any(|skill| e.think.try_cast(skill, Some(&e.target)).is_handled())
        .into()
}

fn lacks_ranged_scopes(e: &Engagement<'_, '_>) -> bool {
    let template = e.think.template();
    !template.skills.has(SkillScope::ShortRange) && !template.skills.has(SkillScope::LongRange)
}

/// Any known skill except the suicide ones, which only the suicide step uses.
fn general_skills(e: &mut Engagement<'_, '_>) -> Status {
    let template = e.think.template();
    if !e.think.skill_chance_roll(&template) {
        return Status::Failure;
    }
    let suicide = template.skills.scope(SkillScope::Suicide);
    let skills: Vec<Skill> = template
        .skills
        .scope(SkillScope::General)
        .iter()
        .filter(|skill| !suicide.iter().any(|s| s.id == skill.id))
        .cloned()
        .collect();
    match e.think.pick(&skills) {
        Some(first) => e.think.cast_ladder(first, &skills, &e.target).into(),
        None => Status::Failure,
    }
}

fn target_close(e: &Engagement<'_, '_>) -> bool {
    e.think.me.reach_to(&e.target) <= e.think.config().short_range_split
}

fn short_range_skills(e: &mut Engagement<'_, '_>) -> Status {
    let template = e.think.template();
    if !template.skills.has(SkillScope::ShortRange)
        || !e.think.rng().chance(template.short_range_chance)
    {
        return Status::Failure;
    }
    e.think.cast_random(SkillScope::ShortRange, &e.target).into()
}

fn long_range_skills(e: &mut Engagement<'_, '_>) -> Status {
    let template = e.think.template();
    if !template.skills.has(SkillScope::LongRange)
        || !e.think.rng().chance(template.long_range_chance)
    {
        return Status::Failure;
    }
    e.think.cast_random(SkillScope::LongRange, &e.target).into()
}

/// Melee when in range and in sight, otherwise close the distance.
fn engage(e: &mut Engagement<'_, '_>) -> Status {
    let think = &mut *e.think;
    let target = &e.target;
    let mut range = think.template().physical_attack_range + think.combined_collision(target);
    if target.is_moving() {
        range += MOVING_RANGE_BONUS;
    }
    if think.me.is_moving() {
        range += MOVING_RANGE_BONUS;
    }

    if think.distance_to(target) > range || !think.can_see(target) {
        if think.me.is_movement_disabled() {
            think.target_reconsider();
        } else {
            let offset = if target.is_moving() {
                range - MOVING_APPROACH_LEAD
            } else {
                range
            };
            think.move_to_pawn(target.id, offset.max(MIN_APPROACH));
        }
    } else {
        if think.me.is_moving() {
            think.combat().stop_moving(think.id());
            think.refresh();
        }
        think.combat().attack(think.id(), target.id);
    }
    Status::Success
}
