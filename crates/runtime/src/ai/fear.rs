//! Fear: the actor flees from its effector until the effect runs out.

use std::time::Duration;

use combat_core::{ActorId, Intention, VisualEffect};
use tracing::debug;

use super::Brain;
use super::context::Think;

/// State of a running fear effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FearTask {
    pub(crate) effector: ActorId,
    pub(crate) remaining: Duration,
    /// The first step only turns the flee visual on.
    pub(crate) first_run: bool,
}

impl Brain {
    /// Starts a fear task. At most one runs per actor; a zero duration is
    /// ignored.
    pub(crate) fn start_fear(&mut self, effector: ActorId, duration: Duration) -> bool {
        if duration.is_zero() || self.fear.is_some() {
            return false;
        }
        self.fear = Some(FearTask {
            effector,
            remaining: duration,
            first_run: true,
        });
        true
    }
}

impl Think<'_> {
    /// One period of the fear task.
    pub(crate) fn fear_step(&mut self, period: Duration) {
        let Some(task) = self.brain.fear.as_mut() else {
            return;
        };
        if task.first_run {
            task.first_run = false;
            self.combat()
                .set_visual_effect(self.id(), VisualEffect::TurnFlee, true);
        } else {
            task.remaining = task.remaining.saturating_sub(period);
            if task.remaining.is_zero() {
                self.end_fear();
                return;
            }
        }

        let Some(effector) = self.brain.fear.map(|task| task.effector) else {
            return;
        };
        let from = self
            .character(effector)
            .map_or(self.me.position, |c| c.position);
        let range = self.config().fear_flee_range;
        let away = |mine: i32, theirs: i32| if mine > theirs { range } else { -range };
        let here = self.me.position;
        let goal = here.offset(away(here.x, from.x), away(here.y, from.y), 0);
        let goal = self.world().move_check(here, goal, self.me.instance);

        self.set_running(true);
        self.set_intention(Intention::MoveTo { destination: goal });
    }

    /// Cancels fear and hands the actor back to the scheduler.
    pub(crate) fn end_fear(&mut self) {
        if self.brain.fear.take().is_none() {
            return;
        }
        self.combat()
            .set_visual_effect(self.id(), VisualEffect::TurnFlee, false);
        debug!(target: "runtime::ai", actor = %self.id(), "fear ended");
        self.set_intention(Intention::Idle);
    }
}
