use crate::error::DecodeError;
use crate::frame::WatchFrame;
use kwatch_core::{Event, ObjectCodec};
use serde_json::de::IoRead;
use serde_json::error::Category;
use serde_json::StreamDeserializer;
use std::io::Read;

type FrameStream<R> = StreamDeserializer<'static, IoRead<R>, WatchFrame>;

/// Reads watch events from a byte source, one frame per call.
///
/// Bytes are pulled from the source only up to the end of the frame being
/// decoded, so the source may be a live connection that never ends. Pass a
/// buffered reader when the source is expensive to read byte by byte.
///
/// A frame that cannot be parsed leaves the stream position unknown, so the
/// decoder is poisoned and every later call fails with
/// [`DecodeError::Poisoned`]. A frame whose object the codec rejects was still
/// consumed whole, so decoding may continue with the next frame.
pub struct Decoder<R: Read, C> {
    frames: Option<FrameStream<R>>,
    codec: C,
    frames_read: u64,
    poisoned: bool,
}

impl<R: Read, C: ObjectCodec> Decoder<R, C> {
    pub fn new(reader: R, codec: C) -> Self {
        Self {
            frames: Some(serde_json::Deserializer::from_reader(reader).into_iter()),
            codec,
            frames_read: 0,
            poisoned: false,
        }
    }

    /// Blocks until the next frame is complete. `Ok(None)` means the source
    /// ended cleanly on a frame boundary.
    pub fn decode(&mut self) -> Result<Option<Event<C::Object>>, DecodeError> {
        if self.poisoned {
            return Err(DecodeError::Poisoned);
        }
        let Some(frames) = self.frames.as_mut() else {
            return Err(DecodeError::Closed);
        };
        let frame = match frames.next() {
            None => {
                tracing::debug!(frames = self.frames_read, "watch stream ended");
                return Ok(None);
            }
            Some(Ok(frame)) => frame,
            Some(Err(error)) => {
                self.poisoned = true;
                let error = classify(error);
                tracing::warn!(frame = self.frames_read, %error, "watch decoder poisoned");
                return Err(error);
            }
        };
        self.frames_read += 1;

        let event_type = frame.event_type;
        let object = self
            .codec
            .decode(frame.object)
            .map_err(|source| DecodeError::Object { event_type, source })?;
        tracing::debug!(frame = self.frames_read - 1, %event_type, "decoded watch frame");
        Ok(Some(Event::new(event_type, object)))
    }

    /// Releases the source. Later calls fail with [`DecodeError::Closed`].
    pub fn close(&mut self) {
        self.frames = None;
    }

    pub fn is_closed(&self) -> bool {
        self.frames.is_none()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: Read, C: ObjectCodec> Iterator for Decoder<R, C> {
    type Item = Result<Event<C::Object>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned || self.frames.is_none() {
            return None;
        }
        match self.decode() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.close();
                None
            }
            Err(error) => Some(Err(error)),
        }
    }
}

fn classify(error: serde_json::Error) -> DecodeError {
    match error.classify() {
        Category::Io => DecodeError::Read(error.into()),
        Category::Eof => DecodeError::Truncated(error),
        Category::Syntax | Category::Data => DecodeError::Malformed(error),
    }
}

#[cfg(test)]
#[path = "decoder_test.rs"]
mod tests;
