use crate::meta::{FlatMeta, NestedMeta, ObjectMeta};
use crate::scheme::ApiObject;
use crate::versions::ApiVersion;
use kwatch_core::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pod {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
    pub status: PodStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodSpec {
    pub containers: Vec<Container>,
    pub node_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodStatus {
    pub phase: String,
}

/// Container entries are spelled the same in every version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl Pod {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            ..Self::default()
        }
    }
}

impl ApiObject for Pod {
    const KIND: &'static str = "Pod";

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn to_versioned(&self, version: ApiVersion) -> Result<Value, CodecError> {
        let value = match version {
            ApiVersion::V1Beta1 => serde_json::to_value(PodV1Beta1 {
                meta: FlatMeta::from_meta(&self.metadata)?,
                desired_state: DesiredStateV1Beta1 {
                    manifest: Manifest {
                        containers: self.spec.containers.clone(),
                    },
                    host: self.spec.node_name.clone(),
                },
                current_state: CurrentStateV1Beta1 {
                    status: self.status.phase.clone(),
                },
            })?,
            ApiVersion::V1Beta2 => serde_json::to_value(PodV1Beta2 {
                meta: FlatMeta::from_meta(&self.metadata)?,
                desired_state: DesiredStateV1Beta2 {
                    manifest: Manifest {
                        containers: self.spec.containers.clone(),
                    },
                    node_name: self.spec.node_name.clone(),
                },
                current_state: CurrentStateV1Beta2 {
                    phase: self.status.phase.clone(),
                },
            })?,
            ApiVersion::V1 => serde_json::to_value(PodV1 {
                metadata: NestedMeta::from_meta(&self.metadata)?,
                spec: PodSpecV1 {
                    containers: self.spec.containers.clone(),
                    node_name: self.spec.node_name.clone(),
                },
                status: PodStatusV1 {
                    phase: self.status.phase.clone(),
                },
            })?,
        };
        Ok(value)
    }

    fn from_versioned(version: ApiVersion, payload: Value) -> Result<Self, CodecError> {
        match version {
            ApiVersion::V1Beta1 => {
                let wire: PodV1Beta1 = serde_json::from_value(payload)?;
                Ok(Self {
                    metadata: wire.meta.into_meta()?,
                    spec: PodSpec {
                        containers: wire.desired_state.manifest.containers,
                        node_name: wire.desired_state.host,
                    },
                    status: PodStatus {
                        phase: wire.current_state.status,
                    },
                })
            }
            ApiVersion::V1Beta2 => {
                let wire: PodV1Beta2 = serde_json::from_value(payload)?;
                Ok(Self {
                    metadata: wire.meta.into_meta()?,
                    spec: PodSpec {
                        containers: wire.desired_state.manifest.containers,
                        node_name: wire.desired_state.node_name,
                    },
                    status: PodStatus {
                        phase: wire.current_state.phase,
                    },
                })
            }
            ApiVersion::V1 => {
                let wire: PodV1 = serde_json::from_value(payload)?;
                Ok(Self {
                    metadata: wire.metadata.into_meta()?,
                    spec: PodSpec {
                        containers: wire.spec.containers,
                        node_name: wire.spec.node_name,
                    },
                    status: PodStatus {
                        phase: wire.status.phase,
                    },
                })
            }
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    #[serde(default)]
    containers: Vec<Container>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodV1Beta1 {
    #[serde(flatten)]
    meta: FlatMeta,
    #[serde(default)]
    desired_state: DesiredStateV1Beta1,
    #[serde(default)]
    current_state: CurrentStateV1Beta1,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DesiredStateV1Beta1 {
    #[serde(default)]
    manifest: Manifest,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    host: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CurrentStateV1Beta1 {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    status: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodV1Beta2 {
    #[serde(flatten)]
    meta: FlatMeta,
    #[serde(default)]
    desired_state: DesiredStateV1Beta2,
    #[serde(default)]
    current_state: CurrentStateV1Beta2,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesiredStateV1Beta2 {
    #[serde(default)]
    manifest: Manifest,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    node_name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CurrentStateV1Beta2 {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    phase: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PodV1 {
    #[serde(default)]
    metadata: NestedMeta,
    #[serde(default)]
    spec: PodSpecV1,
    #[serde(default)]
    status: PodStatusV1,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodSpecV1 {
    #[serde(default)]
    containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    node_name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PodStatusV1 {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    phase: String,
}

#[cfg(test)]
#[path = "pod_test.rs"]
mod tests;
