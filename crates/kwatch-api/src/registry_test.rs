use super::{codec_for, supported_versions};
use crate::{ApiVersion, Pod, Service};

#[test]
fn codec_for_resolves_every_pod_version() {
    for version in ApiVersion::ALL {
        let codec = codec_for::<Pod>(version).expect("pods exist in every version");
        assert_eq!(codec.version(), version);
    }
}

#[test]
fn codec_for_skips_versions_without_the_kind() {
    assert!(codec_for::<Service>(ApiVersion::V1Beta1).is_none());
    assert!(codec_for::<Service>(ApiVersion::V1Beta2).is_some());
    assert_eq!(
        supported_versions::<Service>(),
        vec![ApiVersion::V1Beta2, ApiVersion::V1]
    );
    assert_eq!(supported_versions::<Pod>().len(), 3);
}
