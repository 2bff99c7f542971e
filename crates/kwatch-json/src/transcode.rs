use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::TranscodeError;
use kwatch_core::ObjectCodec;
use std::io::{Read, Write};

/// Re-encodes every remaining frame of `decoder` through `encoder`, typically
/// to move a stream from one api version to another. Returns the number of
/// frames copied once the source ends.
pub fn transcode<R, W, A, B>(
    decoder: &mut Decoder<R, A>,
    encoder: &mut Encoder<W, B>,
) -> Result<u64, TranscodeError>
where
    R: Read,
    W: Write,
    A: ObjectCodec,
    B: ObjectCodec<Object = A::Object>,
{
    let mut frames = 0u64;
    loop {
        let event = match decoder.decode() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(source) => return Err(TranscodeError::Decode { frames, source }),
        };
        encoder
            .encode(&event)
            .map_err(|source| TranscodeError::Encode { frames, source })?;
        frames += 1;
    }
    tracing::debug!(frames, "transcoded watch stream");
    Ok(frames)
}

#[cfg(test)]
#[path = "transcode_test.rs"]
mod tests;
