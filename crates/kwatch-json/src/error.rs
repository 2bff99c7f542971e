use kwatch_core::{CodecError, EventType};

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The object codec refused the object; nothing was written.
    #[error("object codec rejected {event_type} event: {source}")]
    Object {
        event_type: EventType,
        #[source]
        source: CodecError,
    },
    #[error("failed to render watch frame: {0}")]
    Frame(#[source] serde_json::Error),
    /// The sink failed mid-frame; the stream can no longer be trusted.
    #[error("failed to write watch frame: {0}")]
    Write(#[source] std::io::Error),
    #[error("watch stream is corrupted by an earlier failed write")]
    StreamCorrupted,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read watch stream: {0}")]
    Read(#[source] std::io::Error),
    #[error("watch stream ended inside a frame: {0}")]
    Truncated(#[source] serde_json::Error),
    #[error("malformed watch frame: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The frame was well formed but its object was rejected. The stream is
    /// still aligned on a frame boundary.
    #[error("object codec rejected {event_type} event payload: {source}")]
    Object {
        event_type: EventType,
        #[source]
        source: CodecError,
    },
    #[error("watch decoder is unusable after an earlier stream error")]
    Poisoned,
    #[error("watch decoder is closed")]
    Closed,
}

impl DecodeError {
    /// True when the stream position is lost and no later frame can be read.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Object { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("transcode failed after {frames} frame(s): {source}")]
    Decode {
        frames: u64,
        #[source]
        source: DecodeError,
    },
    #[error("transcode failed after {frames} frame(s): {source}")]
    Encode {
        frames: u64,
        #[source]
        source: EncodeError,
    },
}
