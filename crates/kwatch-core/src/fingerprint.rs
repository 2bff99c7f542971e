//! Canonical JSON rendering and its SHA-256 fingerprint.
//!
//! Two payloads that differ only in key order produce the same bytes, so a
//! fingerprint identifies an object independently of how a codec happened to
//! order its fields.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct FingerprintOptions {
    /// Object keys dropped at every depth before hashing.
    pub ignore_object_keys: BTreeSet<String>,
}

impl FingerprintOptions {
    pub fn ignoring<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_object_keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn canonical_json_bytes(value: &Value, options: &FingerprintOptions) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&canonicalize(value, options))
}

pub fn fingerprint_hex(value: &Value, options: &FingerprintOptions) -> serde_json::Result<String> {
    let bytes = canonical_json_bytes(value, options)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

fn canonicalize(value: &Value, options: &FingerprintOptions) -> Value {
    match value {
        Value::Object(object) => {
            let ordered = object
                .iter()
                .filter(|(key, _)| !options.ignore_object_keys.contains(*key))
                .map(|(key, value)| (key.clone(), canonicalize(value, options)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(ordered.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| canonicalize(item, options)).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
