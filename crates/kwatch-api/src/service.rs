use crate::meta::{FlatMeta, NestedMeta, ObjectMeta};
use crate::scheme::ApiObject;
use crate::versions::ApiVersion;
use kwatch_core::{CodecError, FieldPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSpec {
    pub port: u16,
    pub selector: BTreeMap<String, String>,
}

impl Service {
    pub fn named(name: impl Into<String>, port: u16) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: ServiceSpec {
                port,
                selector: BTreeMap::new(),
            },
        }
    }
}

// Services first appear in v1beta2.
impl ApiObject for Service {
    const KIND: &'static str = "Service";

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn supports(version: ApiVersion) -> bool {
        version != ApiVersion::V1Beta1
    }

    fn to_versioned(&self, version: ApiVersion) -> Result<Value, CodecError> {
        let port_path = match version {
            ApiVersion::V1 => FieldPath::keys(["spec", "port"]),
            _ => FieldPath::keys(["port"]),
        };
        ensure_port(self.spec.port, port_path)?;
        let value = match version {
            ApiVersion::V1Beta1 => {
                return Err(CodecError::UnsupportedKind {
                    kind: Self::KIND.to_string(),
                    version: version.to_string(),
                })
            }
            ApiVersion::V1Beta2 => serde_json::to_value(ServiceV1Beta2 {
                meta: FlatMeta::from_meta(&self.metadata)?,
                port: self.spec.port,
                selector: self.spec.selector.clone(),
            })?,
            ApiVersion::V1 => serde_json::to_value(ServiceV1 {
                metadata: NestedMeta::from_meta(&self.metadata)?,
                spec: ServiceSpecV1 {
                    port: self.spec.port,
                    selector: self.spec.selector.clone(),
                },
            })?,
        };
        Ok(value)
    }

    fn from_versioned(version: ApiVersion, payload: Value) -> Result<Self, CodecError> {
        match version {
            ApiVersion::V1Beta1 => Err(CodecError::UnsupportedKind {
                kind: Self::KIND.to_string(),
                version: version.to_string(),
            }),
            ApiVersion::V1Beta2 => {
                let wire: ServiceV1Beta2 = serde_json::from_value(payload)?;
                ensure_port(wire.port, FieldPath::keys(["port"]))?;
                Ok(Self {
                    metadata: wire.meta.into_meta()?,
                    spec: ServiceSpec {
                        port: wire.port,
                        selector: wire.selector,
                    },
                })
            }
            ApiVersion::V1 => {
                let wire: ServiceV1 = serde_json::from_value(payload)?;
                ensure_port(wire.spec.port, FieldPath::keys(["spec", "port"]))?;
                Ok(Self {
                    metadata: wire.metadata.into_meta()?,
                    spec: ServiceSpec {
                        port: wire.spec.port,
                        selector: wire.spec.selector,
                    },
                })
            }
        }
    }
}

fn ensure_port(port: u16, path: FieldPath) -> Result<(), CodecError> {
    if port == 0 {
        return Err(CodecError::InvalidField {
            path,
            reason: "port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceV1Beta2 {
    #[serde(flatten)]
    meta: FlatMeta,
    #[serde(default)]
    port: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    selector: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceV1 {
    #[serde(default)]
    metadata: NestedMeta,
    #[serde(default)]
    spec: ServiceSpecV1,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ServiceSpecV1 {
    #[serde(default)]
    port: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    selector: BTreeMap<String, String>,
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
