//! JSON framing for watch event streams.
//!
//! Each event travels as one `{"type": ..., "object": ...}` value followed by a
//! newline. Frames carry no shared state, so any frame boundary is a valid
//! place to start or stop reading.

mod decoder;
mod encoder;
mod error;
mod frame;
mod transcode;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError, TranscodeError};
pub use frame::{encode_frame_line, parse_frame_line, WatchFrame};
pub use transcode::transcode;

#[cfg(test)]
#[path = "roundtrip_test.rs"]
mod roundtrip_tests;
