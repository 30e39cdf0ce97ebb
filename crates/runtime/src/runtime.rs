//! High-level runtime orchestrator.
//!
//! The runtime owns one worker per AI-driven actor, shares the world
//! collaborators between them, and exposes a builder-based API for the
//! embedding process to spawn actors and observe them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use combat_core::{
    ActorId, ActorTemplate, AiConfig, AiListener, Clock, CombatPrimitives, InMemoryWorld,
    Intention, NoopListener, RngOracle, WorldOracle,
};

use crate::ai::{ActorDirectory, AiCommand, Brain, Spawn};
use crate::api::{ActorRegistry, AiHandle, AiStatus, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::{SharedRng, TickClock};
use crate::workers::{ActorWorker, Services};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Nominal period between two think cycles of an active actor.
    pub think_interval: Duration,
    /// Period of the fear task.
    pub fear_interval: Duration,
    /// Wall time of one game tick, for the default clock.
    pub tick_duration: Duration,
    pub event_buffer_size: usize,
    /// Seed for the default RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            think_interval: Duration::from_secs(1),
            fear_interval: Duration::from_secs(5),
            tick_duration: Duration::from_millis(100),
            event_buffer_size: 100,
            seed: None,
        }
    }
}

/// One actor to hand to the AI.
#[derive(Debug, Clone)]
pub struct ActorSpawn {
    pub id: ActorId,
    pub template: Arc<ActorTemplate>,
    pub spawn: Option<Spawn>,
    pub leader: Option<ActorId>,
    /// Intention requested once the worker is up.
    pub intention: Intention,
}

impl ActorSpawn {
    pub fn new(id: ActorId, template: Arc<ActorTemplate>) -> Self {
        Self {
            id,
            template,
            spawn: None,
            leader: None,
            intention: Intention::Active,
        }
    }

    pub fn at(mut self, spawn: Spawn) -> Self {
        self.spawn = Some(spawn);
        self
    }

    pub fn with_leader(mut self, leader: ActorId) -> Self {
        self.leader = Some(leader);
        self
    }

    /// Start without a think schedule until something wakes the actor.
    pub fn idle(mut self) -> Self {
        self.intention = Intention::Idle;
        self
    }
}

/// Main runtime that drives attackable AI
///
/// Design: each actor's brain lives inside its own worker task.
/// [`AiHandle`] provides a cloneable façade for clients.
pub struct AiRuntime {
    config: RuntimeConfig,
    services: Arc<Services>,
    workers: Mutex<HashMap<ActorId, JoinHandle<()>>>,
}

impl AiRuntime {
    /// Create a new runtime builder
    pub fn builder() -> AiRuntimeBuilder {
        AiRuntimeBuilder::new()
    }

    /// Start a worker for an actor already present in the world.
    ///
    /// A minion's leader is told about it when the leader is already
    /// running, so spawn leaders first.
    pub fn spawn(&self, spawn: ActorSpawn) -> Result<AiHandle> {
        let id = spawn.id;
        let services = &self.services;
        if services.registry.contains(id) {
            return Err(RuntimeError::DuplicateActor(id));
        }
        if services.world.character(id).is_none() {
            return Err(RuntimeError::ActorNotInWorld(id));
        }

        let mut brain = Brain::new(id, spawn.template, &services.config);
        if let Some(point) = spawn.spawn {
            brain = brain.with_spawn(point);
        }
        if let Some(leader) = spawn.leader {
            brain = brain.with_leader(leader);
        }

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(AiStatus::default());
        let handle = AiHandle::new(id, inbox_tx, status_rx);
        if !services.registry.insert(handle.clone()) {
            return Err(RuntimeError::DuplicateActor(id));
        }

        let worker = ActorWorker::new(
            brain,
            Arc::clone(services),
            inbox_rx,
            status_tx,
            self.config.think_interval,
            self.config.fear_interval,
        );
        let join = tokio::spawn(worker.run());
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, join);

        if let Some(leader) = spawn.leader {
            services
                .registry
                .send(leader, AiCommand::MinionJoined { minion: id });
        }
        if !spawn.intention.is_idle() {
            handle.set_intention(spawn.intention)?;
        }

        debug!(target: "runtime", actor = %id, "actor spawned");
        Ok(handle)
    }

    /// Stop an actor's worker and wait for it to finish.
    pub async fn despawn(&self, id: ActorId) -> Result<()> {
        let handle = self
            .services
            .registry
            .remove(id)
            .ok_or(RuntimeError::UnknownActor(id))?;
        handle.shutdown();

        let join = self
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if let Some(join) = join {
            join.await.map_err(RuntimeError::WorkerJoin)?;
        }
        debug!(target: "runtime", actor = %id, "actor despawned");
        Ok(())
    }

    pub fn handle(&self, id: ActorId) -> Option<AiHandle> {
        self.services.registry.get(id)
    }

    /// Ids of every actor with a running worker.
    pub fn actors(&self) -> Vec<ActorId> {
        self.services.registry.ids()
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.services.registry
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.services.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.services.event_bus
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn ai_config(&self) -> &AiConfig {
        &self.services.config
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        for handle in self.services.registry.drain() {
            handle.shutdown();
        }

        let workers: Vec<JoinHandle<()>> = self
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, join)| join)
            .collect();
        let count = workers.len();
        for join in workers {
            join.await.map_err(RuntimeError::WorkerJoin)?;
        }

        info!(target: "runtime", workers = count, "runtime shut down");
        Ok(())
    }
}

/// Builder for [`AiRuntime`] with flexible configuration.
pub struct AiRuntimeBuilder {
    config: RuntimeConfig,
    ai_config: AiConfig,
    world: Option<Arc<dyn WorldOracle>>,
    combat: Option<Arc<dyn CombatPrimitives>>,
    rng: Option<Arc<dyn RngOracle>>,
    clock: Option<Arc<dyn Clock>>,
    listener: Option<Arc<dyn AiListener>>,
}

impl AiRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            ai_config: AiConfig::default(),
            world: None,
            combat: None,
            rng: None,
            clock: None,
            listener: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override AI tuning
    pub fn ai_config(mut self, config: AiConfig) -> Self {
        self.ai_config = config;
        self
    }

    /// Set required world oracle
    pub fn world(mut self, world: Arc<dyn WorldOracle>) -> Self {
        self.world = Some(world);
        self
    }

    /// Set required combat primitives
    pub fn combat(mut self, combat: Arc<dyn CombatPrimitives>) -> Self {
        self.combat = Some(combat);
        self
    }

    /// Use one in-memory world as both world oracle and combat primitives.
    pub fn sandbox(self, world: Arc<InMemoryWorld>) -> Self {
        self.world(world.clone()).combat(world)
    }

    /// Set the RNG (optional, defaults to [`SharedRng`] seeded from the config)
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Set the clock (optional, defaults to [`TickClock`])
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the script listener (optional, defaults to [`NoopListener`])
    pub fn listener(mut self, listener: Arc<dyn AiListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Seed the default RNG
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<AiRuntime> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let combat = self.combat.ok_or(RuntimeError::MissingCombat)?;

        let rng = self.rng.unwrap_or_else(|| match self.config.seed {
            Some(seed) => Arc::new(SharedRng::seeded(seed)),
            None => Arc::new(SharedRng::from_entropy()),
        });
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(TickClock::new(self.config.tick_duration)));
        let listener = self.listener.unwrap_or_else(|| Arc::new(NoopListener));

        let services = Services {
            world,
            combat,
            rng,
            clock,
            listener,
            config: self.ai_config,
            registry: ActorRegistry::new(),
            event_bus: EventBus::with_capacity(self.config.event_buffer_size),
        };

        Ok(AiRuntime {
            config: self.config,
            services: Arc::new(services),
            workers: Mutex::new(HashMap::new()),
        })
    }
}
