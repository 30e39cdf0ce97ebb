//! Shared fixture for the behavior unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use combat_core::{
    ActorId, ActorTemplate, AiConfig, AiEnv, Capabilities, Character, FactionId, InMemoryWorld,
    IntentionKind, ManualClock, NoopListener, NpcInfo, Order, Position, Role, ScriptedRng, Skill,
    SkillId, WorldOracle,
};

use super::cast::CastAttempt;
use super::context::Think;
use super::{ActorDirectory, AiCommand, Brain, Spawn};

/// Directory that records what was sent and answers intention queries from
/// a table the test fills in.
#[derive(Default)]
pub(crate) struct Mailbox {
    intentions: Mutex<HashMap<ActorId, IntentionKind>>,
    sent: Mutex<Vec<(ActorId, AiCommand)>>,
}

impl Mailbox {
    pub(crate) fn set_intention(&self, id: ActorId, kind: IntentionKind) {
        self.intentions.lock().unwrap().insert(id, kind);
    }

    pub(crate) fn sent_to(&self, id: ActorId) -> Vec<AiCommand> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, command)| command.clone())
            .collect()
    }

    pub(crate) fn take(&self) -> Vec<(ActorId, AiCommand)> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl ActorDirectory for Mailbox {
    fn intention_of(&self, id: ActorId) -> Option<IntentionKind> {
        self.intentions.lock().unwrap().get(&id).copied()
    }

    fn send(&self, to: ActorId, command: AiCommand) -> bool {
        self.sent.lock().unwrap().push((to, command));
        true
    }
}

pub(crate) struct Fixture {
    pub(crate) world: InMemoryWorld,
    pub(crate) rng: ScriptedRng,
    pub(crate) clock: ManualClock,
    pub(crate) listener: NoopListener,
    pub(crate) config: AiConfig,
    pub(crate) peers: Mailbox,
    pub(crate) template: Arc<ActorTemplate>,
}

impl Fixture {
    pub(crate) const ACTOR: ActorId = ActorId(1);
    pub(crate) const PLAYER: ActorId = ActorId(100);

    /// An aggressive orc at the origin. Rolls default to 99, which fails
    /// every percent gate.
    pub(crate) fn new() -> Self {
        let world = InMemoryWorld::new();
        let info = NpcInfo {
            role: Role::Monster,
            factions: vec![FactionId(1)],
            aggressive: true,
            attackable: true,
        };
        world
            .insert(Character::npc(Self::ACTOR, info, Position::default()).with_collision(20))
            .unwrap();

        let template = ActorTemplate::new("orc", Role::Monster)
            .with_capabilities(Capabilities::AGGRESSIVE)
            .with_aggro_range(300)
            .with_factions(vec![FactionId(1)], 300);

        Self {
            world,
            rng: ScriptedRng::constant(99),
            clock: ManualClock::at(0),
            listener: NoopListener,
            config: AiConfig::default(),
            peers: Mailbox::default(),
            template: Arc::new(template),
        }
    }

    pub(crate) fn with_player(self, position: Position) -> Self {
        self.with_character(Character::player(Self::PLAYER, position))
    }

    pub(crate) fn with_character(self, character: Character) -> Self {
        self.world.insert(character).unwrap();
        self
    }

    pub(crate) fn with_template(mut self, template: ActorTemplate) -> Self {
        let role = template.role;
        self.world
            .update(Self::ACTOR, |c| {
                if let combat_core::CharacterKind::Npc(info) = &mut c.kind {
                    info.role = role;
                }
            })
            .unwrap();
        self.template = Arc::new(template);
        self
    }

    pub(crate) fn with_rng(mut self, rng: ScriptedRng) -> Self {
        self.rng = rng;
        self
    }

    pub(crate) fn env(&self) -> AiEnv<'_> {
        AiEnv::new(
            &self.world,
            &self.world,
            &self.rng,
            &self.clock,
            &self.listener,
            &self.config,
        )
    }

    pub(crate) fn brain(&self) -> Brain {
        Brain::new(Self::ACTOR, Arc::clone(&self.template), &self.config)
            .with_spawn(Spawn::fixed(Position::default()))
    }

    /// Runs `body` against a fresh cycle context for `brain`.
    pub(crate) fn with_think<R>(&self, brain: &mut Brain, body: impl FnOnce(&mut Think<'_>) -> R) -> R {
        let mut think = Think::new(brain, self.env(), &self.peers).unwrap();
        body(&mut think)
    }

    pub(crate) fn try_cast(
        &self,
        brain: &mut Brain,
        skill: &Skill,
        target: Option<&Character>,
    ) -> CastAttempt {
        self.with_think(brain, |think| think.try_cast(skill, target))
    }

    pub(crate) fn character(&self, id: ActorId) -> Character {
        self.world.character(id).unwrap()
    }

    pub(crate) fn casts_of(&self, actor: ActorId) -> Vec<(SkillId, ActorId)> {
        self.world
            .orders_of(actor)
            .into_iter()
            .filter_map(|order| match order {
                Order::Cast { skill, target, .. } => Some((skill, target)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn attacks_of(&self, actor: ActorId) -> Vec<ActorId> {
        self.world
            .orders_of(actor)
            .into_iter()
            .filter_map(|order| match order {
                Order::Attack { target, .. } => Some(target),
                _ => None,
            })
            .collect()
    }
}
