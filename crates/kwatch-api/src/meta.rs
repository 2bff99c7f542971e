use kwatch_core::{CodecError, FieldPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity and bookkeeping shared by every object kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    pub resource_version: u64,
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Metadata spliced into the top level of a beta payload, keyed by `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FlatMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub resource_version: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl FlatMeta {
    pub fn from_meta(meta: &ObjectMeta) -> Result<Self, CodecError> {
        if meta.name.is_empty() {
            return Err(CodecError::MissingField(FieldPath::keys(["id"])));
        }
        Ok(Self {
            id: meta.name.clone(),
            namespace: meta.namespace.clone(),
            uid: meta.uid.clone(),
            resource_version: meta.resource_version,
            labels: meta.labels.clone(),
        })
    }

    pub fn into_meta(self) -> Result<ObjectMeta, CodecError> {
        if self.id.is_empty() {
            return Err(CodecError::MissingField(FieldPath::keys(["id"])));
        }
        Ok(ObjectMeta {
            name: self.id,
            namespace: self.namespace,
            uid: self.uid,
            resource_version: self.resource_version,
            labels: self.labels,
        })
    }
}

/// Metadata nested under `metadata`, with the resource version carried as an
/// opaque string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NestedMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl NestedMeta {
    pub fn from_meta(meta: &ObjectMeta) -> Result<Self, CodecError> {
        if meta.name.is_empty() {
            return Err(CodecError::MissingField(FieldPath::keys(["metadata", "name"])));
        }
        Ok(Self {
            name: meta.name.clone(),
            namespace: meta.namespace.clone(),
            uid: meta.uid.clone(),
            resource_version: match meta.resource_version {
                0 => String::new(),
                version => version.to_string(),
            },
            labels: meta.labels.clone(),
        })
    }

    pub fn into_meta(self) -> Result<ObjectMeta, CodecError> {
        if self.name.is_empty() {
            return Err(CodecError::MissingField(FieldPath::keys(["metadata", "name"])));
        }
        let resource_version = if self.resource_version.is_empty() {
            0
        } else {
            self.resource_version
                .parse::<u64>()
                .map_err(|error| CodecError::InvalidField {
                    path: FieldPath::keys(["metadata", "resourceVersion"]),
                    reason: format!("`{}` is not a resource version: {error}", self.resource_version),
                })?
        };
        Ok(ObjectMeta {
            name: self.name,
            namespace: self.namespace,
            uid: self.uid,
            resource_version,
            labels: self.labels,
        })
    }
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
#[path = "meta_test.rs"]
mod tests;
