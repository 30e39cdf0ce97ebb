//! Inbox command handling and minion assist.

use combat_core::{ActorId, Intention, IntentionKind};
use tracing::debug;

use super::AiCommand;
use super::context::Think;

/// Hate a leader hands its minions when it is hit itself.
const LEADER_RALLY_HATE: i64 = 10;
/// Hate a leader hands its minions on a minion's call.
const MINION_RALLY_HATE: i64 = 1;
/// Raid groups hold their aggro harder.
const RAID_RALLY_FACTOR: i64 = 10;

impl Think<'_> {
    /// Applies a command that needs the world. Commands that only touch the
    /// brain's own tables are handled before a context is built.
    pub(crate) fn apply(&mut self, command: AiCommand) {
        match command {
            AiCommand::Attacked { attacker, damage } => self.on_attacked(attacker, damage),
            AiCommand::Aggression { target, hate } => self.on_aggression(target, hate),
            AiCommand::AddHate { target, hate } => self.add_hate(target, hate),
            AiCommand::Assist { caller, target } => self.rally_minions(caller, target),
            AiCommand::SetIntention(intention) => self.set_intention(intention),
            AiCommand::Arrived => {
                if let Intention::MoveTo { .. } = self.brain.intention {
                    self.set_intention(Intention::Active);
                }
            }
            AiCommand::Afraid { effector, duration } => {
                if self.brain.start_fear(effector, duration) {
                    debug!(target: "runtime::ai", actor = %self.id(), %effector, ?duration, "afraid");
                }
            }
            AiCommand::FearEnded => self.end_fear(),
            AiCommand::Died
            | AiCommand::Forget { .. }
            | AiCommand::MinionJoined { .. }
            | AiCommand::MinionDied { .. } => {}
        }
    }

    fn on_attacked(&mut self, attacker: ActorId, damage: i64) {
        if self.me.is_dead() {
            return;
        }
        self.brain.attack_timeout = self.now + self.config().attack_timeout_ticks;
        if self.brain.global_aggro < 0 {
            self.brain.global_aggro = 0;
        }
        self.brain.threat.add(attacker, damage, damage.max(1));
        if !self.brain.attacked_by.contains(&attacker) {
            self.brain.attacked_by.push(attacker);
        }
        if self.brain.fear.is_some() {
            return;
        }

        self.set_running(true);
        let retarget = match self.brain.intention {
            Intention::Attack { target } => self.brain.threat.most_hated() != Some(target),
            _ => true,
        };
        if retarget {
            self.set_intention(Intention::Attack { target: attacker });
        }
        self.minion_assist(attacker);
    }

    fn on_aggression(&mut self, target: ActorId, hate: i64) {
        if self.me.is_dead() {
            return;
        }
        self.brain.threat.raise_to(target, hate);
        if self.brain.fear.is_some() {
            return;
        }
        if self.brain.intention != (Intention::Attack { target }) {
            self.set_running(true);
            self.set_intention(Intention::Attack { target });
        }
        self.minion_assist(target);
    }

    pub(crate) fn add_hate(&mut self, target: ActorId, hate: i64) {
        self.brain.threat.add(target, 0, hate);
        if self.brain.intention.is_idle() && hate > 0 {
            self.set_intention(Intention::Active);
        }
    }

    /// A leader rallies its own minions; a minion asks its leader to.
    fn minion_assist(&mut self, target: ActorId) {
        if !self.brain.minions.is_empty() {
            self.rally_minions(self.id(), target);
        } else if let Some(leader) = self.brain.leader {
            self.peers.send(
                leader,
                AiCommand::Assist {
                    caller: self.id(),
                    target,
                },
            );
        }
    }

    /// Hands hate on `target` to every live minion other than `caller`.
    pub(crate) fn rally_minions(&mut self, caller: ActorId, target: ActorId) {
        let from_self = caller == self.id();
        if !from_self && self.brain.intention.kind() != IntentionKind::Attack {
            self.add_hate(target, 1);
        }

        let mut hate = if from_self {
            LEADER_RALLY_HATE
        } else {
            MINION_RALLY_HATE
        };
        if self.brain.template.is_raid() {
            hate *= RAID_RALLY_FACTOR;
        }

        let minions = self.brain.minions.clone();
        for minion in minions {
            if minion == caller {
                continue;
            }
            let alive = self.character(minion).is_some_and(|m| !m.is_dead());
            if !alive {
                continue;
            }
            let busy = self.peers.intention_of(minion) == Some(IntentionKind::Attack);
            if from_self || !busy {
                self.peers.send(minion, AiCommand::AddHate { target, hate });
            }
        }
    }
}
