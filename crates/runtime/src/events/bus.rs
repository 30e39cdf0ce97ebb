//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CombatEvent, DiagnosticEvent, IntentionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Intention transitions
    Intention,
    /// Target switches and fear
    Combat,
    /// Failed or panicked think cycles
    Diagnostics,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Intention(IntentionEvent),
    Combat(CombatEvent),
    Diagnostics(DiagnosticEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Intention(_) => Topic::Intention,
            Event::Combat(_) => Topic::Combat,
            Event::Diagnostics(_) => Topic::Diagnostics,
        }
    }
}

struct Channels {
    intention: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    diagnostics: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Intention => &self.intention,
            Topic::Combat => &self.combat,
            Topic::Diagnostics => &self.diagnostics,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic's channel exists from construction.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                intention: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                diagnostics: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActorId, IntentionKind};

    use super::*;

    fn intention_event() -> Event {
        Event::Intention(IntentionEvent {
            actor: ActorId(1),
            from: IntentionKind::Idle,
            to: IntentionKind::Active,
            tick: 0,
        })
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut intentions = bus.subscribe(Topic::Intention);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(intention_event());

        assert_eq!(intentions.recv().await.unwrap(), intention_event());
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Combat(CombatEvent::FearStarted {
            actor: ActorId(3),
            tick: 7,
        }));
    }
}
