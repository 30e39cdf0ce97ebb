//! Cloneable façade for one actor's AI worker.
//!
//! [`AiHandle`] hides channel plumbing: commands go to the worker's inbox and
//! read accessors come from the status the worker publishes after every step.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use combat_core::{ActorId, Intention, IntentionKind};

use super::errors::{Result, RuntimeError};
use crate::ai::AiCommand;
use crate::workers::Envelope;

/// What an actor's AI currently looks like from outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiStatus {
    pub intention: Intention,
    pub attack_target: Option<ActorId>,
    pub afraid: bool,
}

/// Client-facing handle to an actor's AI
#[derive(Clone, Debug)]
pub struct AiHandle {
    id: ActorId,
    inbox: mpsc::UnboundedSender<Envelope>,
    status: watch::Receiver<AiStatus>,
}

impl AiHandle {
    pub(crate) fn new(
        id: ActorId,
        inbox: mpsc::UnboundedSender<Envelope>,
        status: watch::Receiver<AiStatus>,
    ) -> Self {
        Self { id, inbox, status }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Post a command to the actor's inbox
    pub fn send(&self, command: AiCommand) -> Result<()> {
        self.inbox
            .send(Envelope::Command(command))
            .map_err(|_| RuntimeError::CommandChannelClosed(self.id))
    }

    /// Report that `attacker` hit this actor
    pub fn attacked(&self, attacker: ActorId, damage: i64) -> Result<()> {
        self.send(AiCommand::Attacked { attacker, damage })
    }

    pub fn aggression(&self, target: ActorId, hate: i64) -> Result<()> {
        self.send(AiCommand::Aggression { target, hate })
    }

    pub fn set_intention(&self, intention: Intention) -> Result<()> {
        self.send(AiCommand::SetIntention(intention))
    }

    pub fn afraid(&self, effector: ActorId, duration: Duration) -> Result<()> {
        self.send(AiCommand::Afraid { effector, duration })
    }

    pub fn forget(&self, target: ActorId) -> Result<()> {
        self.send(AiCommand::Forget { target })
    }

    pub fn died(&self) -> Result<()> {
        self.send(AiCommand::Died)
    }

    /// Latest published status
    pub fn status(&self) -> AiStatus {
        *self.status.borrow()
    }

    pub fn intention(&self) -> Intention {
        self.status().intention
    }

    pub fn attack_target(&self) -> Option<ActorId> {
        self.status().attack_target
    }

    pub fn is_afraid(&self) -> bool {
        self.status().afraid
    }

    /// Wait until the published status satisfies `ready`
    pub async fn wait_for(&self, ready: impl FnMut(&AiStatus) -> bool) -> Result<AiStatus> {
        let mut status = self.status.clone();
        let reached = status
            .wait_for(ready)
            .await
            .map_err(|_| RuntimeError::StatusChannelClosed(self.id))?;
        Ok(*reached)
    }

    /// Wait until the actor holds an intention of `kind`
    pub async fn wait_for_intention(&self, kind: IntentionKind) -> Result<Intention> {
        let status = self.wait_for(|status| status.intention.kind() == kind).await?;
        Ok(status.intention)
    }

    /// Ask the worker to stop. Returns false when it already has.
    pub(crate) fn shutdown(&self) -> bool {
        self.inbox.send(Envelope::Shutdown).is_ok()
    }
}
