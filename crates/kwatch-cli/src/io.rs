use kwatch_core::EventType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;

/// One entry of an `encode` input document. The object is given in the `v1`
/// shape; `kind` and `apiVersion` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub object: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("read file failed `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("input events parse failed `{path}`: {reason}")]
    Parse { path: String, reason: String },
}

/// Reads a YAML or JSON list of events, picking the format by extension and
/// falling back to YAML then JSON.
pub fn read_input_events(path: &Path) -> Result<Vec<InputEvent>, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str::<Vec<InputEvent>>(raw.as_str()).map_err(|error| error.to_string()),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str::<Vec<InputEvent>>(raw.as_str()).map_err(|error| error.to_string())
        }
        _ => serde_yaml::from_str::<Vec<InputEvent>>(raw.as_str())
            .or_else(|_| serde_json::from_str::<Vec<InputEvent>>(raw.as_str()))
            .map_err(|error| error.to_string()),
    };
    parsed.map_err(|reason| InputError::Parse {
        path: path.display().to_string(),
        reason,
    })
}

/// Opens the stream source: a file, or stdin for `None` and `-`.
pub(crate) fn open_source(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(Box::new(BufReader::new(File::open(path)?))),
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

pub(crate) fn create_sink(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}

pub(crate) fn describe_source(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

#[cfg(test)]
#[path = "io_test.rs"]
mod tests;
