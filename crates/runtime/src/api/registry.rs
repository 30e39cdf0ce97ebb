//! Directory of the live AI workers, keyed by actor.
//!
//! The registry is how actors reach each other: faction and minion assist
//! read a peer's published intention and post commands to its inbox. It is
//! shared by the runtime and every worker.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use combat_core::{ActorId, IntentionKind};
use tracing::trace;

use super::AiHandle;
use crate::ai::{ActorDirectory, AiCommand};

#[derive(Clone, Default)]
pub struct ActorRegistry {
    actors: Arc<RwLock<HashMap<ActorId, AiHandle>>>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle`. Returns false when the actor already had one.
    pub(crate) fn insert(&self, handle: AiHandle) -> bool {
        let mut actors = self.actors.write().unwrap_or_else(PoisonError::into_inner);
        if actors.contains_key(&handle.id()) {
            return false;
        }
        actors.insert(handle.id(), handle);
        true
    }

    pub(crate) fn remove(&self, id: ActorId) -> Option<AiHandle> {
        self.actors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    pub(crate) fn drain(&self) -> Vec<AiHandle> {
        self.actors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, handle)| handle)
            .collect()
    }

    pub fn get(&self, id: ActorId) -> Option<AiHandle> {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Ids of every registered actor, sorted.
    pub fn ids(&self) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = self
            .actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActorDirectory for ActorRegistry {
    fn intention_of(&self, id: ActorId) -> Option<IntentionKind> {
        self.get(id).map(|handle| handle.intention().kind())
    }

    fn send(&self, to: ActorId, command: AiCommand) -> bool {
        let Some(handle) = self.get(to) else {
            trace!(target: "runtime::registry", actor = %to, command = command.name(), "no worker for command");
            return false;
        };
        handle.send(command).is_ok()
    }
}
