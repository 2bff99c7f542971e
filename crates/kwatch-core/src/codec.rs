//! Object codec contract consumed by the framing layer.
//!
//! A codec turns one kind of application object into an opaque JSON payload and
//! back. The associated `Object` type is the type hint a decoder needs: it is
//! fixed when the codec is chosen, never read from the wire.

use crate::field_path::FieldPath;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("kind `{kind}` is not supported by codec version `{version}`")]
    UnsupportedKind { kind: String, version: String },
    #[error("payload kind mismatch: expected `{expected}`, got `{actual}`")]
    KindMismatch { expected: String, actual: String },
    #[error("payload version mismatch: expected `{expected}`, got `{actual}`")]
    VersionMismatch { expected: String, actual: String },
    #[error("payload is missing required field {0}")]
    MissingField(FieldPath),
    #[error("payload field {path} is invalid: {reason}")]
    InvalidField { path: FieldPath, reason: String },
    #[error("payload json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait ObjectCodec {
    type Object;

    fn encode(&self, object: &Self::Object) -> Result<Value, CodecError>;

    fn decode(&self, payload: Value) -> Result<Self::Object, CodecError>;
}

impl<C: ObjectCodec + ?Sized> ObjectCodec for &C {
    type Object = C::Object;

    fn encode(&self, object: &Self::Object) -> Result<Value, CodecError> {
        (**self).encode(object)
    }

    fn decode(&self, payload: Value) -> Result<Self::Object, CodecError> {
        (**self).decode(payload)
    }
}

/// Codec for any serde type, rendered with its own derive.
pub struct JsonCodec<T> {
    _object: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self { _object: PhantomData }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("object", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> ObjectCodec for JsonCodec<T> {
    type Object = T;

    fn encode(&self, object: &T) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(object)?)
    }

    fn decode(&self, payload: Value) -> Result<T, CodecError> {
        Ok(serde_json::from_value(payload)?)
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
