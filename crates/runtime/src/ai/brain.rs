//! Per-actor AI state and the think dispatch boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use combat_core::{
    ActorId, ActorTemplate, AiConfig, AiEnv, CombatError, Conditions, Intention, Position,
    ThreatTable, Tick, VisualEffect,
};
use tracing::{debug, error};

use super::context::Think;
use super::fear::FearTask;
use super::{ActorDirectory, AiCommand, ThinkError};

/// Where an actor wanders and what it is leashed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub point: Position,
    /// Wander targets come from the world's territory instead of a circle
    /// around `point`.
    pub territorial: bool,
}

impl Spawn {
    pub const fn fixed(point: Position) -> Self {
        Self {
            point,
            territorial: false,
        }
    }

    pub const fn territory(point: Position) -> Self {
        Self {
            point,
            territorial: true,
        }
    }
}

/// Why a scheduled think did not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another think for this actor has not returned yet.
    InProgress,
    /// The fear handler drives the actor.
    Afraid,
    Dead,
    SkillsDisabled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThinkOutcome {
    Ran,
    Skipped(SkipReason),
    Failed(ThinkError),
}

/// Re-entrancy flag held for the duration of one think cycle.
///
/// Released on drop, so early returns and unwinding panics both clear it.
struct ThinkGuard(Arc<AtomicBool>);

impl ThinkGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for ThinkGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Everything the AI remembers about one actor between ticks.
///
/// The world owns the actor itself; the brain holds only what the world does
/// not know: intention, threat, counters, group links and the fear task.
#[derive(Debug)]
pub struct Brain {
    pub(crate) id: ActorId,
    pub(crate) template: Arc<ActorTemplate>,
    pub(crate) spawn: Option<Spawn>,
    pub(crate) leader: Option<ActorId>,
    pub(crate) minions: Vec<ActorId>,
    /// Minions that died since the group last forgot its aggro.
    pub(crate) fallen_minions: Vec<ActorId>,

    pub(crate) intention: Intention,
    pub(crate) threat: ThreatTable,
    pub(crate) attacked_by: Vec<ActorId>,
    pub(crate) attack_target: Option<ActorId>,
    pub(crate) global_aggro: i32,
    pub(crate) attack_timeout: Tick,
    pub(crate) last_buff_tick: Option<Tick>,
    pub(crate) chaos_time: u32,
    pub(crate) fear: Option<FearTask>,

    thinking: Arc<AtomicBool>,
}

impl Brain {
    pub fn new(id: ActorId, template: Arc<ActorTemplate>, config: &AiConfig) -> Self {
        Self {
            id,
            template,
            spawn: None,
            leader: None,
            minions: Vec::new(),
            fallen_minions: Vec::new(),
            intention: Intention::Idle,
            threat: ThreatTable::new(),
            attacked_by: Vec::new(),
            attack_target: None,
            global_aggro: config.spawn_global_aggro,
            attack_timeout: Tick::MAX,
            last_buff_tick: None,
            chaos_time: 0,
            fear: None,
            thinking: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_spawn(mut self, spawn: Spawn) -> Self {
        self.spawn = Some(spawn);
        self
    }

    pub fn with_leader(mut self, leader: ActorId) -> Self {
        self.leader = Some(leader);
        self
    }

    pub fn with_minions(mut self, minions: impl IntoIterator<Item = ActorId>) -> Self {
        self.minions.extend(minions);
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn template(&self) -> &ActorTemplate {
        &self.template
    }

    pub fn intention(&self) -> Intention {
        self.intention
    }

    pub fn attack_target(&self) -> Option<ActorId> {
        self.attack_target
    }

    pub fn threat(&self) -> &ThreatTable {
        &self.threat
    }

    pub fn attacked_by(&self) -> &[ActorId] {
        &self.attacked_by
    }

    pub fn global_aggro(&self) -> i32 {
        self.global_aggro
    }

    pub fn attack_timeout(&self) -> Tick {
        self.attack_timeout
    }

    pub fn leader(&self) -> Option<ActorId> {
        self.leader
    }

    pub fn minions(&self) -> &[ActorId] {
        &self.minions
    }

    pub fn fallen_minions(&self) -> &[ActorId] {
        &self.fallen_minions
    }

    pub fn is_afraid(&self) -> bool {
        self.fear.is_some()
    }

    /// Remaining fear time, if a fear task is running.
    pub fn fear_remaining(&self) -> Option<Duration> {
        self.fear.as_ref().map(|task| task.remaining)
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::Acquire)
    }

    /// Runs one think cycle.
    ///
    /// Failures are logged here with the actor and its intention and come
    /// back as [`ThinkOutcome::Failed`]; nothing propagates further.
    pub fn think(&mut self, env: &AiEnv<'_>, peers: &dyn ActorDirectory) -> ThinkOutcome {
        let Some(_guard) = ThinkGuard::acquire(&self.thinking) else {
            return ThinkOutcome::Skipped(SkipReason::InProgress);
        };
        if self.fear.is_some() {
            return ThinkOutcome::Skipped(SkipReason::Afraid);
        }

        let result = Think::new(self, *env, peers).and_then(|mut think| think.run());
        match result {
            Ok(outcome) => outcome,
            Err(failure) => {
                error!(
                    target: "runtime::ai",
                    actor = %self.id,
                    intention = %self.intention.kind(),
                    code = failure.error_code(),
                    "think failed: {}",
                    failure
                );
                ThinkOutcome::Failed(failure)
            }
        }
    }

    /// Applies one inbox command.
    pub fn handle(&mut self, command: AiCommand, env: &AiEnv<'_>, peers: &dyn ActorDirectory) {
        match command {
            AiCommand::Died => {
                self.die(env, peers);
                return;
            }
            AiCommand::Forget { target } => {
                self.forget(target);
                return;
            }
            AiCommand::MinionJoined { minion } => {
                if !self.minions.contains(&minion) {
                    self.minions.push(minion);
                }
                return;
            }
            AiCommand::MinionDied { minion } => {
                self.minions.retain(|m| *m != minion);
                if !self.fallen_minions.contains(&minion) {
                    self.fallen_minions.push(minion);
                }
                return;
            }
            _ => {}
        }

        let id = self.id;
        let name = command.name();
        match Think::new(self, *env, peers) {
            Ok(mut think) => think.apply(command),
            Err(failure) => {
                debug!(target: "runtime::ai", actor = %id, command = name, "dropping command: {}", failure);
            }
        }
    }

    /// Advances the fear task by one period. Does nothing when not afraid.
    pub fn fear_step(&mut self, env: &AiEnv<'_>, peers: &dyn ActorDirectory, period: Duration) {
        if self.fear.is_none() {
            return;
        }
        let id = self.id;
        match Think::new(self, *env, peers) {
            Ok(mut think) => think.fear_step(period),
            Err(failure) => {
                debug!(target: "runtime::ai", actor = %id, "fear step skipped: {}", failure);
            }
        }
    }

    fn forget(&mut self, target: ActorId) {
        self.threat.remove(target);
        self.attacked_by.retain(|a| *a != target);
        if self.attack_target == Some(target) {
            self.attack_target = None;
        }
    }

    /// Death cancels fear, wipes the tables and parks the actor in IDLE
    /// without the usual coercion.
    fn die(&mut self, env: &AiEnv<'_>, peers: &dyn ActorDirectory) {
        if self.fear.take().is_some() {
            env.combat
                .set_visual_effect(self.id, VisualEffect::TurnFlee, false);
        }
        self.threat.clear();
        self.attacked_by.clear();
        self.attack_target = None;
        self.chaos_time = 0;
        self.intention = Intention::Idle;
        if let Some(leader) = self.leader {
            peers.send(leader, AiCommand::MinionDied { minion: self.id });
        }
        debug!(target: "runtime::ai", actor = %self.id, "died");
    }
}

impl<'a> Think<'a> {
    /// Skip checks and intention dispatch for one cycle.
    pub(crate) fn run(&mut self) -> Result<ThinkOutcome, ThinkError> {
        if self.me.is_dead() {
            return Ok(ThinkOutcome::Skipped(SkipReason::Dead));
        }
        if self.me.has(Conditions::ALL_SKILLS_DISABLED) {
            return Ok(ThinkOutcome::Skipped(SkipReason::SkillsDisabled));
        }

        match self.brain.intention {
            Intention::Active => self.think_active(),
            Intention::Attack { .. } => self.think_attack(),
            Intention::Cast { skill, target } => self.think_cast(skill, target)?,
            Intention::MoveTo { .. } => {
                if !self.me.is_moving() {
                    self.set_intention(Intention::Active);
                }
            }
            Intention::Idle | Intention::Follow { .. } => {}
        }
        Ok(ThinkOutcome::Ran)
    }
}
