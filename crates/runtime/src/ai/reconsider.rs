//! Alternative target selection.
//!
//! Used when the preferred target is out of range, already affected, or the
//! actor is rooted and has to pick something it can still hit.

use combat_core::{Capabilities, Character, Skill};
use tracing::debug;

use super::context::Think;

/// Extra radius scanned for candidates beyond the skill's own cast range.
const CANDIDATE_SCAN_SLACK: i32 = 200;
/// Candidates on the move are treated as this much closer.
const MOVING_CANDIDATE_BONUS: i32 = 70;

/// What kind of target an effect skill wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EffectMode {
    /// Same-faction allies without the effect.
    Positive,
    /// Hostiles without the effect.
    Negative,
    /// Hostiles carrying a removable buff.
    Dispel,
}

impl Think<'_> {
    /// Whether `candidate` is inside the skill's cast range, counting both
    /// collision radii.
    fn in_cast_range(&self, skill: &Skill, candidate: &Character) -> bool {
        let mut dist = self.distance_to(candidate) - self.me.collision_radius;
        if candidate.is_moving() {
            dist -= MOVING_CANDIDATE_BONUS;
        }
        dist <= skill.cast_range + self.me.collision_radius + candidate.collision_radius
    }

    fn scan_radius(&self, skill: &Skill) -> i32 {
        skill.cast_range + self.me.collision_radius + CANDIDATE_SCAN_SLACK
    }

    /// Characters that recently hit the actor, other than the attack target.
    fn attackers(&self) -> Vec<Character> {
        self.brain
            .attacked_by
            .iter()
            .filter(|id| Some(**id) != self.brain.attack_target)
            .filter_map(|id| self.character(*id))
            .filter(|c| !c.is_dead() && self.can_see(c))
            .collect()
    }

    /// Picks a target for an effect skill the attack target cannot take.
    pub(crate) fn effect_target(&self, skill: &Skill, mode: EffectMode) -> Option<Character> {
        let known = self.world().known_characters(self.id(), self.scan_radius(skill));
        let template = self.template();
        let fits = |c: &Character| {
            !c.is_dead() && self.in_cast_range(skill, c) && self.can_see(c)
        };
        match mode {
            EffectMode::Positive => known.into_iter().find(|c| {
                c.is_attackable_npc()
                    && (template.factions.is_empty() || c.shares_faction(&template.factions))
                    && !c.effects.has_skill(skill.id)
                    && fits(c)
            }),
            EffectMode::Negative => {
                let unaffected = |c: &Character| !c.effects.has_skill(skill.id) && fits(c);
                self.attackers()
                    .into_iter()
                    .find(|c| unaffected(c))
                    .or_else(|| {
                        known
                            .into_iter()
                            .find(|c| c.is_playable() && unaffected(c))
                    })
            }
            EffectMode::Dispel => {
                let buffed = |c: &Character| c.effects.has_removable_buff() && fits(c);
                self.attackers()
                    .into_iter()
                    .find(|c| buffed(c))
                    .or_else(|| known.into_iter().find(|c| c.is_playable() && buffed(c)))
            }
        }
    }

    /// Picks a target for a damaging skill the attack target is out of
    /// range for: threat entries first, then anything hostile nearby.
    pub(crate) fn skill_target(&self, skill: &Skill) -> Option<Character> {
        let fits = |c: &Character| {
            c.id != self.id() && !c.is_dead() && self.can_see(c) && self.in_cast_range(skill, c)
        };
        let from_threat = self
            .brain
            .threat
            .targets()
            .into_iter()
            .filter_map(|id| self.character(id))
            .find(|c| fits(c));
        if from_threat.is_some() {
            return from_threat;
        }

        let template = self.template();
        if template.role.is_guard() {
            return None;
        }
        self.world()
            .known_characters(self.id(), self.scan_radius(skill))
            .into_iter()
            .filter(|c| self.hostile_bystander(c))
            .find(|c| fits(c))
    }

    /// Players, summons and, for chaotic actors, other-faction attackables.
    fn hostile_bystander(&self, c: &Character) -> bool {
        let template = self.template();
        c.is_playable()
            || (template.is(Capabilities::CHAOTIC)
                && c.is_attackable_npc()
                && !c.shares_faction(&template.factions))
    }

    fn transfer_hate(&self) -> i64 {
        let hate = self
            .brain
            .threat
            .most_hated()
            .map_or(0, |id| self.brain.threat.hate_of(id));
        if hate > 0 {
            hate
        } else {
            self.config().reconsider_fallback_hate
        }
    }

    /// Picks anything within physical reach when the current target cannot
    /// be reached, and moves the top hate onto it.
    pub(crate) fn target_reconsider(&mut self) {
        let template = self.template();
        let transfer = self.transfer_hate();
        let reach = |think: &Self, c: &Character| {
            c.id != think.id()
                && !c.is_dead()
                && think.can_see(c)
                && think.distance_to(c)
                    <= template.physical_attack_range + think.combined_collision(c)
        };

        let mut candidates: Vec<Character> = Vec::new();
        if let Some(most) = self.brain.threat.most_hated().and_then(|id| self.character(id)) {
            candidates.push(most);
        }
        candidates.extend(
            self.brain
                .threat
                .targets()
                .into_iter()
                .filter_map(|id| self.character(id)),
        );
        let picked = candidates.into_iter().find(|c| reach(self, c)).or_else(|| {
            if template.role.is_guard() {
                return None;
            }
            let radius =
                template.physical_attack_range + self.me.collision_radius + CANDIDATE_SCAN_SLACK;
            self.world()
                .known_characters(self.id(), radius)
                .into_iter()
                .find(|c| self.hostile_bystander(c) && reach(self, c))
        });

        if let Some(target) = picked {
            debug!(target: "runtime::ai", actor = %self.id(), target = %target.id, "target reconsidered");
            self.brain.threat.add(target.id, 0, transfer);
            self.retarget(target.id);
        }
    }

    /// Random switch to another threat entry.
    pub(crate) fn aggro_reconsider(&mut self) {
        let transfer = self.transfer_hate();
        let candidates: Vec<Character> = self
            .brain
            .threat
            .targets()
            .into_iter()
            .filter(|id| Some(*id) != self.brain.attack_target && *id != self.id())
            .filter_map(|id| self.character(id))
            .filter(|c| !c.is_dead() && self.can_see(c))
            .collect();
        if candidates.is_empty() {
            return;
        }
        let pick = self.rng().below(candidates.len() as u32) as usize;
        let Some(target) = candidates.get(pick) else {
            return;
        };
        debug!(target: "runtime::ai", actor = %self.id(), target = %target.id, "aggro reconsidered");
        self.brain.threat.add(target.id, 0, transfer);
        self.retarget(target.id);
    }
}
