use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Kind of change a watch event reports. Spelled upper case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Added,
    Modified,
    Deleted,
    Error,
    Bookmark,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Added,
        EventType::Modified,
        EventType::Deleted,
        EventType::Error,
        EventType::Bookmark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Modified => "MODIFIED",
            Self::Deleted => "DELETED",
            Self::Error => "ERROR",
            Self::Bookmark => "BOOKMARK",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown watch event type `{0}`")]
pub struct ParseEventTypeError(pub String);

impl FromStr for EventType {
    type Err = ParseEventTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == input)
            .ok_or_else(|| ParseEventTypeError(input.to_string()))
    }
}

/// One change notification: what happened, and the object it happened to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<T> {
    pub event_type: EventType,
    pub object: T,
}

impl<T> Event<T> {
    pub fn new(event_type: EventType, object: T) -> Self {
        Self { event_type, object }
    }

    pub fn added(object: T) -> Self {
        Self::new(EventType::Added, object)
    }

    pub fn modified(object: T) -> Self {
        Self::new(EventType::Modified, object)
    }

    pub fn deleted(object: T) -> Self {
        Self::new(EventType::Deleted, object)
    }
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
