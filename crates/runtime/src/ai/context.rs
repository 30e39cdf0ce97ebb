//! Per-cycle context shared by every behavior.
//!
//! A [`Think`] is built at the start of each cycle (or command) from the
//! actor's [`Brain`] and a fresh world snapshot of the actor. All behavior
//! modules add methods to it, so they read the same snapshot and issue orders
//! through the same collaborators.

use std::sync::Arc;

use combat_core::{
    ActorId, ActorTemplate, AiConfig, AiEnv, Character, CombatPrimitives, Position, RngOracle,
    Skill, Tick, WorldOracle,
};

use super::{ActorDirectory, Brain, ThinkError};

pub(crate) struct Think<'a> {
    pub(crate) brain: &'a mut Brain,
    pub(crate) env: AiEnv<'a>,
    pub(crate) peers: &'a dyn ActorDirectory,
    /// Snapshot of the actor, refreshed after orders that change it.
    pub(crate) me: Character,
    pub(crate) now: Tick,
}

impl<'a> Think<'a> {
    pub(crate) fn new(
        brain: &'a mut Brain,
        env: AiEnv<'a>,
        peers: &'a dyn ActorDirectory,
    ) -> Result<Self, ThinkError> {
        let me = env
            .world
            .character(brain.id)
            .ok_or(ThinkError::ActorMissing(brain.id))?;
        let now = env.clock.now();
        Ok(Self {
            brain,
            env,
            peers,
            me,
            now,
        })
    }

    pub(crate) fn id(&self) -> ActorId {
        self.brain.id
    }

    /// Shared handle on the template, so skill slices can be held across
    /// `&mut self` calls.
    pub(crate) fn template(&self) -> Arc<ActorTemplate> {
        Arc::clone(&self.brain.template)
    }

    pub(crate) fn config(&self) -> &'a AiConfig {
        self.env.config
    }

    pub(crate) fn world(&self) -> &'a dyn WorldOracle {
        self.env.world
    }

    pub(crate) fn combat(&self) -> &'a dyn CombatPrimitives {
        self.env.combat
    }

    pub(crate) fn rng(&self) -> &'a dyn RngOracle {
        self.env.rng
    }

    pub(crate) fn character(&self, id: ActorId) -> Option<Character> {
        self.world().character(id)
    }

    /// Re-reads the actor after an order that may have changed it.
    pub(crate) fn refresh(&mut self) {
        if let Some(me) = self.world().character(self.id()) {
            self.me = me;
        }
    }

    pub(crate) fn can_see(&self, other: &Character) -> bool {
        self.world().can_see(self.id(), other.id)
    }

    pub(crate) fn distance_to(&self, other: &Character) -> i32 {
        self.me.position.plane_distance(&other.position)
    }

    pub(crate) fn combined_collision(&self, other: &Character) -> i32 {
        self.me.collision_radius + other.collision_radius
    }

    /// Uniformly picks one skill of a scope.
    pub(crate) fn pick<'s>(&self, skills: &'s [Skill]) -> Option<&'s Skill> {
        skills.get(self.rng().below(skills.len() as u32) as usize)
    }

    /// Roll against the template's skill-chance window.
    pub(crate) fn skill_chance_roll(&self, template: &ActorTemplate) -> bool {
        let rng = self.rng();
        rng.below(100) < rng.between(template.min_skill_chance, template.max_skill_chance)
    }

    pub(crate) fn move_to(&mut self, destination: Position) {
        self.combat().move_to(self.id(), destination);
        self.refresh();
    }

    pub(crate) fn move_to_pawn(&mut self, target: ActorId, offset: i32) {
        self.combat().move_to_pawn(self.id(), target, offset);
        self.refresh();
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        if self.me.is_running() != running {
            self.combat().set_running(self.id(), running);
            self.refresh();
        }
    }
}

/// Context of the combat decision tree: the cycle plus the resolved target.
pub(crate) struct Engagement<'t, 'a> {
    pub(crate) think: &'t mut Think<'a>,
    pub(crate) target: Character,
}
