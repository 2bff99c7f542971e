use kwatch_core::EventType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire envelope for one event. The object stays nested under `object` so its
/// own fields can never collide with `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchFrame {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub object: Value,
}

impl WatchFrame {
    pub fn new(event_type: EventType, object: Value) -> Self {
        Self { event_type, object }
    }
}

pub fn encode_frame_line(frame: &WatchFrame) -> serde_json::Result<Vec<u8>> {
    let mut line = serde_json::to_vec(frame)?;
    line.push(b'\n');
    Ok(line)
}

pub fn parse_frame_line(line: &str) -> serde_json::Result<WatchFrame> {
    serde_json::from_str::<WatchFrame>(line.trim_end())
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;
