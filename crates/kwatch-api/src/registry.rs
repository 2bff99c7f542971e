use crate::scheme::{ApiObject, SchemeCodec};
use crate::versions::ApiVersion;

/// Looks up the codec for `T` at `version`. `None` when the kind does not
/// exist in that version.
pub fn codec_for<T: ApiObject>(version: ApiVersion) -> Option<SchemeCodec<T>> {
    T::supports(version).then(|| SchemeCodec::new(version))
}

pub fn supported_versions<T: ApiObject>() -> Vec<ApiVersion> {
    ApiVersion::ALL
        .into_iter()
        .filter(|version| T::supports(*version))
        .collect()
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
