use crate::cli::{ConvertCommand, DecodeCommand, EncodeCommand, ObjectKind, OutputFormat};
use crate::config::{ConfigError, KwatchConfig};
use crate::io::{create_sink, describe_source, open_source, read_input_events, InputError, InputEvent};
use kwatch_api::{codec_for, supported_versions, ApiObject, ApiVersion, Pod, SchemeCodec, Service};
use kwatch_core::{fingerprint_hex, CodecError, Event, FingerprintOptions, ObjectCodec};
use kwatch_json::{transcode, DecodeError, Decoder, EncodeError, Encoder, TranscodeError};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::Path;

const DEFAULT_KIND: ObjectKind = ObjectKind::Pod;
const DEFAULT_API_VERSION: ApiVersion = ApiVersion::V1;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("open stream failed `{path}`: {source}")]
    OpenSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("create output failed `{path}`: {source}")]
    CreateOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write output failed: {0}")]
    WriteOutput(#[source] std::io::Error),
    #[error("api version `{version}` has no `{kind}` kind (supported: {})", render_versions(.supported))]
    UnsupportedKind {
        kind: &'static str,
        version: ApiVersion,
        supported: Vec<ApiVersion>,
    },
    #[error("input event {index} has an invalid object: {source}")]
    InputObject {
        index: usize,
        #[source]
        source: CodecError,
    },
    #[error("encode failed at event {index}: {source}")]
    Encode {
        index: usize,
        #[source]
        source: EncodeError,
    },
    #[error("decode failed after {frames} frame(s): {source}")]
    Decode {
        frames: u64,
        #[source]
        source: DecodeError,
    },
    #[error("render canonical object failed: {0}")]
    Canonical(#[source] CodecError),
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
    #[error("render output failed: {0}")]
    Render(#[from] serde_json::Error),
}

/// Writes the events listed in `command.input` as frames to `--output` or
/// `out`. Returns the number of frames written.
pub fn execute_encode(command: &EncodeCommand, config: &KwatchConfig, out: &mut dyn Write) -> Result<u64, RunError> {
    let kind = command.kind.or(config.kind).unwrap_or(DEFAULT_KIND);
    let version = command.api_version.or(config.api_version).unwrap_or(DEFAULT_API_VERSION);
    let events = read_input_events(command.input.as_path())?;
    with_sink(command.output.as_deref(), out, |sink| match kind {
        ObjectKind::Pod => encode_events::<Pod>(&events, version, sink),
        ObjectKind::Service => encode_events::<Service>(&events, version, sink),
    })
}

/// Prints every event of the stream as it arrives. Returns the number of
/// frames decoded once the stream ends.
pub fn execute_decode(command: &DecodeCommand, config: &KwatchConfig, out: &mut dyn Write) -> Result<u64, RunError> {
    let kind = command.kind.or(config.kind).unwrap_or(DEFAULT_KIND);
    let version = command.api_version.or(config.api_version).unwrap_or(DEFAULT_API_VERSION);
    let source = open(command.input.as_deref())?;
    let options = FingerprintOptions::ignoring(command.fingerprint_ignore.iter().cloned());
    match kind {
        ObjectKind::Pod => decode_events::<Pod>(source, version, command.format, &options, out),
        ObjectKind::Service => decode_events::<Service>(source, version, command.format, &options, out),
    }
}

/// Re-encodes a stream from `--from` to `--to`. Returns the frame count.
pub fn execute_convert(command: &ConvertCommand, config: &KwatchConfig, out: &mut dyn Write) -> Result<u64, RunError> {
    let kind = command.kind.or(config.kind).unwrap_or(DEFAULT_KIND);
    let source = open(command.input.as_deref())?;
    with_sink(command.output.as_deref(), out, |sink| match kind {
        ObjectKind::Pod => convert_events::<Pod>(source, command.from, command.to, sink),
        ObjectKind::Service => convert_events::<Service>(source, command.from, command.to, sink),
    })
}

fn encode_events<T: ApiObject>(events: &[InputEvent], version: ApiVersion, sink: &mut dyn Write) -> Result<u64, RunError> {
    let codec = supported_codec::<T>(version)?;
    let canonical = SchemeCodec::<T>::new(ApiVersion::V1);
    let mut encoder = Encoder::new(sink, codec);
    for (index, input) in events.iter().enumerate() {
        let object = canonical
            .decode(with_markers::<T>(input.object.clone()))
            .map_err(|source| RunError::InputObject { index, source })?;
        encoder
            .encode(&Event::new(input.event_type, object))
            .map_err(|source| RunError::Encode { index, source })?;
    }
    tracing::info!(frames = encoder.frames_written(), kind = T::KIND, %version, "encoded watch stream");
    Ok(encoder.frames_written())
}

fn decode_events<T: ApiObject>(
    source: Box<dyn BufRead>,
    version: ApiVersion,
    format: OutputFormat,
    options: &FingerprintOptions,
    out: &mut dyn Write,
) -> Result<u64, RunError> {
    let codec = supported_codec::<T>(version)?;
    let canonical = SchemeCodec::<T>::new(ApiVersion::V1);
    let mut decoder = Decoder::new(source, codec);
    loop {
        let event = match decoder.decode() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(source) => {
                return Err(RunError::Decode {
                    frames: decoder.frames_read(),
                    source,
                })
            }
        };
        let rendered = canonical.encode(&event.object).map_err(RunError::Canonical)?;
        let fingerprint = fingerprint_hex(&rendered, options)?;
        let line = match format {
            OutputFormat::Text => {
                let meta = event.object.metadata();
                let namespace = if meta.namespace.is_empty() { "-" } else { meta.namespace.as_str() };
                format!(
                    "{} {} {}/{} rv={} fingerprint={}",
                    event.event_type,
                    T::KIND,
                    namespace,
                    meta.name,
                    meta.resource_version,
                    &fingerprint[..12]
                )
            }
            OutputFormat::Json => serde_json::to_string(&json!({
                "type": event.event_type,
                "object": rendered,
                "fingerprint": fingerprint,
            }))?,
        };
        writeln!(out, "{line}").map_err(RunError::WriteOutput)?;
        out.flush().map_err(RunError::WriteOutput)?;
    }
    tracing::info!(frames = decoder.frames_read(), kind = T::KIND, %version, "decoded watch stream");
    Ok(decoder.frames_read())
}

fn convert_events<T: ApiObject>(
    source: Box<dyn BufRead>,
    from: ApiVersion,
    to: ApiVersion,
    sink: &mut dyn Write,
) -> Result<u64, RunError> {
    let mut decoder = Decoder::new(source, supported_codec::<T>(from)?);
    let mut encoder = Encoder::new(sink, supported_codec::<T>(to)?);
    let frames = transcode(&mut decoder, &mut encoder)?;
    tracing::info!(frames, kind = T::KIND, %from, %to, "converted watch stream");
    Ok(frames)
}

fn supported_codec<T: ApiObject>(version: ApiVersion) -> Result<SchemeCodec<T>, RunError> {
    codec_for::<T>(version).ok_or_else(|| RunError::UnsupportedKind {
        kind: T::KIND,
        version,
        supported: supported_versions::<T>(),
    })
}

fn render_versions(versions: &[ApiVersion]) -> String {
    versions
        .iter()
        .map(|version| version.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stamps `kind` and `apiVersion: v1` on input objects that leave them out.
fn with_markers<T: ApiObject>(mut object: Value) -> Value {
    if let Some(fields) = object.as_object_mut() {
        fields
            .entry("kind")
            .or_insert_with(|| Value::String(T::KIND.to_string()));
        fields
            .entry("apiVersion")
            .or_insert_with(|| Value::String(ApiVersion::V1.to_string()));
    }
    object
}

fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>, RunError> {
    open_source(path).map_err(|source| RunError::OpenSource {
        path: describe_source(path),
        source,
    })
}

fn with_sink<F>(output: Option<&Path>, out: &mut dyn Write, write: F) -> Result<u64, RunError>
where
    F: FnOnce(&mut dyn Write) -> Result<u64, RunError>,
{
    match output {
        Some(path) => {
            let mut file = create_sink(path).map_err(|source| RunError::CreateOutput {
                path: path.display().to_string(),
                source,
            })?;
            let frames = write(&mut file)?;
            file.flush().map_err(RunError::WriteOutput)?;
            Ok(frames)
        }
        None => write(out),
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
