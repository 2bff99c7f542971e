use crate::meta::ObjectMeta;
use crate::versions::ApiVersion;
use kwatch_core::{CodecError, FieldPath, ObjectCodec};
use serde_json::{Map, Value};
use std::marker::PhantomData;

pub(crate) const KIND_FIELD: &str = "kind";
pub(crate) const API_VERSION_FIELD: &str = "apiVersion";

/// An object kind that can be rendered in one or more api versions.
///
/// `to_versioned` and `from_versioned` only deal with the kind's own fields;
/// the `kind` and `apiVersion` markers are owned by [`SchemeCodec`].
pub trait ApiObject: Sized {
    const KIND: &'static str;

    fn metadata(&self) -> &ObjectMeta;

    fn supports(version: ApiVersion) -> bool {
        let _ = version;
        true
    }

    fn to_versioned(&self, version: ApiVersion) -> Result<Value, CodecError>;

    fn from_versioned(version: ApiVersion, payload: Value) -> Result<Self, CodecError>;
}

/// Codec for one object kind pinned to one api version.
///
/// The type parameter is the decode-side type hint: a `SchemeCodec<Pod>` only
/// ever materializes pods and rejects payloads stamped with another kind.
pub struct SchemeCodec<T> {
    version: ApiVersion,
    _kind: PhantomData<fn() -> T>,
}

impl<T: ApiObject> SchemeCodec<T> {
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            _kind: PhantomData,
        }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    fn ensure_supported(&self) -> Result<(), CodecError> {
        if T::supports(self.version) {
            Ok(())
        } else {
            Err(CodecError::UnsupportedKind {
                kind: T::KIND.to_string(),
                version: self.version.to_string(),
            })
        }
    }
}

impl<T> Clone for SchemeCodec<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            _kind: PhantomData,
        }
    }
}

impl<T> Copy for SchemeCodec<T> {}

impl<T: ApiObject> std::fmt::Debug for SchemeCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeCodec")
            .field("kind", &T::KIND)
            .field("version", &self.version)
            .finish()
    }
}

impl<T: ApiObject> ObjectCodec for SchemeCodec<T> {
    type Object = T;

    fn encode(&self, object: &T) -> Result<Value, CodecError> {
        self.ensure_supported()?;
        let mut payload = object.to_versioned(self.version)?;
        let Some(fields) = payload.as_object_mut() else {
            return Err(CodecError::InvalidField {
                path: FieldPath::root(),
                reason: format!("{} must render as a JSON object", T::KIND),
            });
        };
        fields.insert(KIND_FIELD.to_string(), Value::String(T::KIND.to_string()));
        fields.insert(
            API_VERSION_FIELD.to_string(),
            Value::String(self.version.as_str().to_string()),
        );
        Ok(payload)
    }

    fn decode(&self, payload: Value) -> Result<T, CodecError> {
        self.ensure_supported()?;
        let Value::Object(mut fields) = payload else {
            return Err(CodecError::InvalidField {
                path: FieldPath::root(),
                reason: "payload must be a JSON object".to_string(),
            });
        };
        let kind = take_marker(&mut fields, KIND_FIELD)?;
        if kind != T::KIND {
            return Err(CodecError::KindMismatch {
                expected: T::KIND.to_string(),
                actual: kind,
            });
        }
        let version = take_marker(&mut fields, API_VERSION_FIELD)?;
        if version != self.version.as_str() {
            return Err(CodecError::VersionMismatch {
                expected: self.version.to_string(),
                actual: version,
            });
        }
        T::from_versioned(self.version, Value::Object(fields))
    }
}

fn take_marker(fields: &mut Map<String, Value>, key: &str) -> Result<String, CodecError> {
    match fields.remove(key) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(CodecError::InvalidField {
            path: FieldPath::keys([key]),
            reason: format!("expected a string, got {other}"),
        }),
        None => Err(CodecError::MissingField(FieldPath::keys([key]))),
    }
}

#[cfg(test)]
#[path = "scheme_test.rs"]
mod tests;
