//! Versioned resource objects and the codecs that render them.

pub mod meta;
pub mod pod;
pub mod registry;
pub mod scheme;
pub mod service;
pub mod versions;

pub use meta::ObjectMeta;
pub use pod::{Container, Pod, PodSpec, PodStatus};
pub use registry::{codec_for, supported_versions};
pub use scheme::{ApiObject, SchemeCodec};
pub use service::{Service, ServiceSpec};
pub use versions::{ApiVersion, ParseApiVersionError};
