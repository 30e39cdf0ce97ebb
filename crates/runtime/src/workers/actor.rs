//! Actor worker that owns one [`Brain`].
//!
//! The worker is the only writer of its brain. Commands arrive on an
//! unbounded inbox; while the actor is IDLE the worker waits on the inbox
//! alone, otherwise commands are queued and applied at the start of the next
//! think tick. A running fear task gets its own interval, started and
//! dropped with the task.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use combat_core::CombatError;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, trace};

use super::{Envelope, Services};
use crate::ai::{AiCommand, Brain, ThinkError, ThinkOutcome};
use crate::api::AiStatus;
use crate::events::{CombatEvent, DiagnosticEvent, Event, IntentionEvent};

const MIN_PERIOD: Duration = Duration::from_millis(1);

pub(crate) struct ActorWorker {
    brain: Brain,
    services: Arc<Services>,
    inbox: mpsc::UnboundedReceiver<Envelope>,
    /// Commands received while the think schedule runs.
    pending: VecDeque<AiCommand>,
    status: watch::Sender<AiStatus>,
    published: AiStatus,
    think_period: Duration,
    fear_period: Duration,
    think_timer: Option<Interval>,
    fear_timer: Option<Interval>,
}

impl ActorWorker {
    pub(crate) fn new(
        brain: Brain,
        services: Arc<Services>,
        inbox: mpsc::UnboundedReceiver<Envelope>,
        status: watch::Sender<AiStatus>,
        think_period: Duration,
        fear_period: Duration,
    ) -> Self {
        let published = *status.borrow();
        Self {
            brain,
            services,
            inbox,
            pending: VecDeque::new(),
            status,
            published,
            think_period: think_period.max(MIN_PERIOD),
            fear_period: fear_period.max(MIN_PERIOD),
            think_timer: None,
            fear_timer: None,
        }
    }

    /// Main worker loop. Returns on shutdown or when every handle is gone.
    pub(crate) async fn run(mut self) {
        debug!(target: "runtime::worker", actor = %self.brain.id(), "worker started");
        loop {
            tokio::select! {
                envelope = self.inbox.recv() => match envelope {
                    Some(Envelope::Command(command)) if self.think_timer.is_some() => {
                        self.pending.push_back(command);
                    }
                    Some(Envelope::Command(command)) => self.handle(command),
                    Some(Envelope::Shutdown) | None => break,
                },
                _ = next_tick(&mut self.think_timer) => self.tick(),
                _ = next_tick(&mut self.fear_timer) => self.fear_step(),
            }
            self.reschedule();
            self.sync();
        }
        debug!(target: "runtime::worker", actor = %self.brain.id(), "worker stopped");
    }

    fn handle(&mut self, command: AiCommand) {
        let services = Arc::clone(&self.services);
        trace!(target: "runtime::worker", actor = %self.brain.id(), command = command.name(), "command");
        self.brain.handle(command, &services.env(), &services.registry);
    }

    fn drain_pending(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            self.handle(command);
        }
    }

    /// One think tick: queued commands first, then the think cycle.
    fn tick(&mut self) {
        self.drain_pending();

        let services = Arc::clone(&self.services);
        let env = services.env();
        let actor = self.brain.id();
        let intention = self.brain.intention().kind();
        let brain = &mut self.brain;
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| brain.think(&env, &services.registry)));

        match outcome {
            Ok(ThinkOutcome::Ran) => {}
            Ok(ThinkOutcome::Skipped(reason)) => {
                trace!(target: "runtime::worker", actor = %actor, ?reason, "think skipped");
            }
            Ok(ThinkOutcome::Failed(failure)) => {
                services
                    .event_bus
                    .publish(Event::Diagnostics(DiagnosticEvent::ThinkFailed {
                        actor,
                        intention,
                        code: failure.error_code().to_string(),
                        message: failure.to_string(),
                    }));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                let failure = ThinkError::Panicked(message.clone());
                error!(
                    target: "runtime::worker",
                    actor = %actor,
                    intention = %intention,
                    code = failure.error_code(),
                    "{}",
                    failure
                );
                services
                    .event_bus
                    .publish(Event::Diagnostics(DiagnosticEvent::ThinkPanicked {
                        actor,
                        message,
                    }));
            }
        }
    }

    fn fear_step(&mut self) {
        let services = Arc::clone(&self.services);
        self.brain
            .fear_step(&services.env(), &services.registry, self.fear_period);
    }

    /// Starts or stops the think and fear intervals to match the brain.
    fn reschedule(&mut self) {
        if self.brain.intention().is_idle() && !self.pending.is_empty() {
            self.drain_pending();
        }

        let thinking = !self.brain.intention().is_idle();
        match (self.think_timer.is_some(), thinking) {
            (false, true) => {
                let mut timer =
                    time::interval_at(Instant::now() + self.think_period, self.think_period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.think_timer = Some(timer);
                debug!(target: "runtime::worker", actor = %self.brain.id(), "think schedule started");
            }
            (true, false) => {
                self.think_timer = None;
                debug!(target: "runtime::worker", actor = %self.brain.id(), "think schedule stopped");
            }
            _ => {}
        }

        match (self.fear_timer.is_some(), self.brain.is_afraid()) {
            (false, true) => self.fear_timer = Some(time::interval(self.fear_period)),
            (true, false) => self.fear_timer = None,
            _ => {}
        }
    }

    /// Publishes the status and the events for whatever changed since the
    /// last publication.
    fn sync(&mut self) {
        let status = AiStatus {
            intention: self.brain.intention(),
            attack_target: self.brain.attack_target(),
            afraid: self.brain.is_afraid(),
        };
        if status == self.published {
            return;
        }

        let actor = self.brain.id();
        let tick = self.services.clock.now();
        let bus = &self.services.event_bus;
        let before = self.published;

        if status.intention.kind() != before.intention.kind() {
            bus.publish(Event::Intention(IntentionEvent {
                actor,
                from: before.intention.kind(),
                to: status.intention.kind(),
                tick,
            }));
        }
        if status.attack_target != before.attack_target {
            bus.publish(Event::Combat(CombatEvent::TargetChanged {
                actor,
                target: status.attack_target,
                tick,
            }));
        }
        if status.afraid != before.afraid {
            let event = if status.afraid {
                CombatEvent::FearStarted { actor, tick }
            } else {
                CombatEvent::FearEnded { actor, tick }
            };
            bus.publish(Event::Combat(event));
        }

        self.published = status;
        self.status.send_replace(status);
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
