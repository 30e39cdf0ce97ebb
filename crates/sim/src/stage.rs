//! Sandbox world setup and script replay for one scenario.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use combat_content::{NpcSpec, ScenarioSpec, ScriptedAction, ScriptedEvent};
use combat_core::{
    ActorId, ActorTemplate, Character, CharacterKind, InMemoryWorld, NpcInfo, PlayerInfo,
};
use runtime::{ActorSpawn, AiRuntime, Spawn};
use tokio::time::{Instant, sleep_until};
use tracing::{info, warn};

const NPC_COLLISION_RADIUS: i32 = 20;

/// A populated world plus the actors to hand to the AI, leaders first.
pub struct Stage {
    pub world: Arc<InMemoryWorld>,
    pub spawns: Vec<ActorSpawn>,
}

impl Stage {
    pub fn build(
        scenario: &ScenarioSpec,
        templates: &HashMap<String, Arc<ActorTemplate>>,
    ) -> Result<Self> {
        let world = Arc::new(InMemoryWorld::new());
        if let Some(town) = scenario.town {
            world.set_town(town);
        }
        for zone in &scenario.peace_zones {
            world.add_peace_zone(*zone);
        }
        for zone in &scenario.obstacles {
            world.add_obstacle(*zone);
        }

        for player in &scenario.players {
            let mut character = Character::player(ActorId(player.id), player.position);
            character.kind = CharacterKind::Player(PlayerInfo {
                karma: player.karma,
                access_level: player.access_level,
                ..PlayerInfo::default()
            });
            world.insert(character)?;
        }

        let mut spawns = Vec::with_capacity(scenario.npcs.len());
        let (leaders, minions): (Vec<&NpcSpec>, Vec<&NpcSpec>) =
            scenario.npcs.iter().partition(|npc| npc.leader.is_none());
        for npc in leaders.into_iter().chain(minions) {
            let template = templates.get(&npc.template).with_context(|| {
                format!("npc {} uses unknown template '{}'", npc.id, npc.template)
            })?;
            spawns.push(place_npc(&world, npc, template)?);
        }

        Ok(Self { world, spawns })
    }
}

fn place_npc(
    world: &InMemoryWorld,
    npc: &NpcSpec,
    template: &Arc<ActorTemplate>,
) -> Result<ActorSpawn> {
    let id = ActorId(npc.id);
    let info = NpcInfo {
        role: template.role,
        factions: template.factions.clone(),
        aggressive: template.is_aggressive(),
        attackable: true,
    };
    world.insert(Character::npc(id, info, npc.position).with_collision(NPC_COLLISION_RADIUS))?;

    let spawn = if npc.territory.is_empty() {
        Spawn::fixed(npc.position)
    } else {
        world.set_territory(id, npc.territory.clone());
        Spawn::territory(npc.position)
    };

    let mut request = ActorSpawn::new(id, Arc::clone(template)).at(spawn);
    if let Some(leader) = npc.leader {
        request = request.with_leader(ActorId(leader));
    }
    if npc.idle {
        request = request.idle();
    }
    Ok(request)
}

/// Applies scripted events to the world and the AI.
pub struct Director<'a> {
    runtime: &'a AiRuntime,
    world: &'a InMemoryWorld,
}

impl<'a> Director<'a> {
    pub fn new(runtime: &'a AiRuntime, world: &'a InMemoryWorld) -> Self {
        Self { runtime, world }
    }

    /// Replays `script` against the wall clock, then waits out `duration`.
    pub async fn replay(&self, script: &[ScriptedEvent], duration: Duration) -> Result<()> {
        let start = Instant::now();
        for event in script {
            let at = Duration::from_millis(event.at_ms);
            if at > duration {
                warn!(at_ms = event.at_ms, "event past the end of the run, skipped");
                continue;
            }
            sleep_until(start + at).await;
            self.apply(&event.action)?;
        }
        sleep_until(start + duration).await;
        Ok(())
    }

    pub fn apply(&self, action: &ScriptedAction) -> Result<()> {
        match action {
            ScriptedAction::Attack {
                attacker,
                target,
                damage,
            } => self.attack(ActorId(*attacker), ActorId(*target), *damage),
            ScriptedAction::Fear {
                effector,
                target,
                duration_ms,
            } => {
                let target = ActorId(*target);
                match self.runtime.handle(target) {
                    Some(handle) => {
                        info!(target = %target, duration_ms, "fear");
                        handle.afraid(ActorId(*effector), Duration::from_millis(*duration_ms))?;
                    }
                    None => warn!(target = %target, "fear on an actor without AI, ignored"),
                }
                Ok(())
            }
            ScriptedAction::Move { actor, to } => {
                let actor = ActorId(*actor);
                self.world.update(actor, |c| c.position = *to)?;
                info!(actor = %actor, x = to.x, y = to.y, "moved");
                Ok(())
            }
            ScriptedAction::Kill { target } => self.kill(ActorId(*target)),
        }
    }

    fn attack(&self, attacker: ActorId, target: ActorId, damage: i64) -> Result<()> {
        let wound = u32::try_from(damage.max(0)).unwrap_or(u32::MAX);
        let mut killed = false;
        self.world.update(target, |c| {
            c.hp.current = c.hp.current.saturating_sub(wound);
            killed = c.is_dead();
        })?;
        info!(attacker = %attacker, target = %target, damage, "hit");

        if let Some(handle) = self.runtime.handle(target) {
            handle.attacked(attacker, damage)?;
        }
        if killed {
            self.kill(target)?;
        }
        Ok(())
    }

    /// Zeroes `target`'s hp and makes every other actor forget it.
    fn kill(&self, target: ActorId) -> Result<()> {
        self.world.update(target, |c| c.hp.current = 0)?;
        info!(target = %target, "killed");

        if let Some(handle) = self.runtime.handle(target) {
            handle.died()?;
        }
        for id in self.runtime.actors() {
            if id == target {
                continue;
            }
            if let Some(handle) = self.runtime.handle(id) {
                handle.forget(target)?;
            }
        }
        Ok(())
    }
}
