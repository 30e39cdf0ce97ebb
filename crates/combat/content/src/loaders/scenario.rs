//! Sandbox scenario loader.
//!
//! A scenario places players and template-backed NPCs into an
//! [`InMemoryWorld`](combat_core::InMemoryWorld) and scripts what happens to
//! them over time.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{Position, Zone};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Default run length when the simulator is not told otherwise.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub town: Option<Position>,
    #[serde(default)]
    pub peace_zones: Vec<Zone>,
    #[serde(default)]
    pub obstacles: Vec<Zone>,
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub npcs: Vec<NpcSpec>,
    #[serde(default)]
    pub script: Vec<ScriptedEvent>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerSpec {
    pub id: u32,
    pub position: Position,
    #[serde(default)]
    pub karma: i32,
    #[serde(default)]
    pub access_level: u8,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NpcSpec {
    pub id: u32,
    /// Template name from `templates.ron`.
    pub template: String,
    pub position: Position,
    #[serde(default)]
    pub leader: Option<u32>,
    /// Territory points; empty means a fixed spawn.
    #[serde(default)]
    pub territory: Vec<Position>,
    /// Spawn IDLE instead of ACTIVE.
    #[serde(default)]
    pub idle: bool,
}

/// Something the simulator does to the world at `at_ms`.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedEvent {
    pub at_ms: u64,
    pub action: ScriptedAction,
}

#[derive(Clone, Debug, Deserialize)]
pub enum ScriptedAction {
    Attack {
        attacker: u32,
        target: u32,
        damage: i64,
    },
    Fear {
        effector: u32,
        target: u32,
        duration_ms: u64,
    },
    Move {
        actor: u32,
        to: Position,
    },
    Kill {
        target: u32,
    },
}

impl ScenarioSpec {
    /// Rejects duplicate ids and references to characters the scenario does
    /// not place.
    pub fn validate(&self) -> LoadResult<()> {
        let mut ids = HashSet::new();
        for id in self
            .players
            .iter()
            .map(|p| p.id)
            .chain(self.npcs.iter().map(|n| n.id))
        {
            if !ids.insert(id) {
                anyhow::bail!("Scenario '{}' places character {} twice", self.name, id);
            }
        }

        for npc in &self.npcs {
            if let Some(leader) = npc.leader
                && !self.npcs.iter().any(|n| n.id == leader)
            {
                anyhow::bail!(
                    "Scenario '{}': npc {} follows unknown leader {}",
                    self.name,
                    npc.id,
                    leader
                );
            }
        }

        for event in &self.script {
            let referenced: Vec<u32> = match &event.action {
                ScriptedAction::Attack {
                    attacker, target, ..
                } => vec![*attacker, *target],
                ScriptedAction::Fear {
                    effector, target, ..
                } => vec![*effector, *target],
                ScriptedAction::Move { actor, .. } => vec![*actor],
                ScriptedAction::Kill { target } => vec![*target],
            };
            if let Some(missing) = referenced.iter().find(|id| !ids.contains(*id)) {
                anyhow::bail!(
                    "Scenario '{}': event at {}ms references unknown character {}",
                    self.name,
                    event.at_ms,
                    missing
                );
            }
        }
        Ok(())
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        let mut scenario: ScenarioSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.validate()?;
        scenario.script.sort_by_key(|event| event.at_ms);
        Ok(scenario)
    }
}
