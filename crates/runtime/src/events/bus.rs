//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CommandEvent, EncounterEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player-facing narrative (activation, phase, defeat, split, flee, lockout)
    Encounter,
    /// Executed and rejected commands
    Command,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Encounter(EncounterEvent),
    Command(CommandEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Encounter(_) => Topic::Encounter,
            Event::Command(_) => Topic::Command,
        }
    }
}

/// Topic-based event bus.
///
/// Publishing never blocks; events sent while a topic has no subscribers are
/// dropped, and slow subscribers observe `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    encounter: broadcast::Sender<Event>,
    command: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a bus with `capacity` buffered events per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            encounter: broadcast::channel(capacity).0,
            command: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Encounter => &self.encounter,
            Topic::Command => &self.command,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!(?topic, "no subscribers for topic");
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
