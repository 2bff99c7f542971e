use crate::error::EncodeError;
use crate::frame::{encode_frame_line, WatchFrame};
use kwatch_core::{Event, ObjectCodec};
use std::io::Write;

/// Writes watch events to a sink, one flushed frame per call.
///
/// The whole frame is rendered before the sink is touched, so a codec failure
/// leaves the stream exactly as it was. A sink failure may have left part of a
/// frame behind; from then on every call fails with
/// [`EncodeError::StreamCorrupted`].
pub struct Encoder<W, C> {
    writer: W,
    codec: C,
    frames_written: u64,
    corrupted: bool,
}

impl<W: Write, C: ObjectCodec> Encoder<W, C> {
    pub fn new(writer: W, codec: C) -> Self {
        Self {
            writer,
            codec,
            frames_written: 0,
            corrupted: false,
        }
    }

    pub fn encode(&mut self, event: &Event<C::Object>) -> Result<(), EncodeError> {
        if self.corrupted {
            return Err(EncodeError::StreamCorrupted);
        }
        let object = self
            .codec
            .encode(&event.object)
            .map_err(|source| EncodeError::Object {
                event_type: event.event_type,
                source,
            })?;
        let line = encode_frame_line(&WatchFrame::new(event.event_type, object)).map_err(EncodeError::Frame)?;

        if let Err(error) = self.writer.write_all(&line).and_then(|()| self.writer.flush()) {
            self.corrupted = true;
            tracing::warn!(
                frame = self.frames_written,
                event_type = %event.event_type,
                %error,
                "watch sink failed, stream marked corrupted"
            );
            return Err(EncodeError::Write(error));
        }

        tracing::debug!(
            frame = self.frames_written,
            event_type = %event.event_type,
            bytes = line.len(),
            "encoded watch frame"
        );
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
#[path = "encoder_test.rs"]
mod tests;
