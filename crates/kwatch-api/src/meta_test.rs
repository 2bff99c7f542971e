use super::{FlatMeta, NestedMeta, ObjectMeta};
use kwatch_core::CodecError;
use serde_json::json;

fn sample() -> ObjectMeta {
    let mut meta = ObjectMeta::named("foo")
        .with_namespace("default")
        .with_label("app", "web");
    meta.uid = "uid-1".to_string();
    meta.resource_version = 42;
    meta
}

#[test]
fn flat_meta_uses_id_and_numeric_version() {
    let value = serde_json::to_value(FlatMeta::from_meta(&sample()).expect("named meta")).expect("must encode");
    assert_eq!(
        value,
        json!({
            "id": "foo",
            "namespace": "default",
            "uid": "uid-1",
            "resourceVersion": 42,
            "labels": {"app": "web"}
        })
    );
}

#[test]
fn nested_meta_carries_version_as_string() {
    let value = serde_json::to_value(NestedMeta::from_meta(&sample()).expect("named meta")).expect("must encode");
    assert_eq!(value["name"], "foo");
    assert_eq!(value["resourceVersion"], "42");

    let decoded: NestedMeta = serde_json::from_value(value).expect("must decode");
    assert_eq!(decoded.into_meta().expect("must convert"), sample());
}

#[test]
fn empty_fields_are_omitted() {
    let value = serde_json::to_value(NestedMeta::from_meta(&ObjectMeta::named("bare")).expect("named meta")).expect("must encode");
    assert_eq!(value, json!({"name": "bare"}));
}

#[test]
fn nested_meta_rejects_non_numeric_version() {
    let decoded: NestedMeta =
        serde_json::from_value(json!({"name": "foo", "resourceVersion": "abc"})).expect("must decode");
    let error = decoded.into_meta().expect_err("must fail");
    match error {
        CodecError::InvalidField { path, .. } => assert_eq!(path.to_string(), "$.metadata.resourceVersion"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn flat_meta_requires_id() {
    let decoded: FlatMeta = serde_json::from_value(json!({"namespace": "default"})).expect("must decode");
    let error = decoded.into_meta().expect_err("must fail");
    assert!(matches!(error, CodecError::MissingField(path) if path.to_string() == "$.id"));
}

#[test]
fn unnamed_meta_is_rejected_before_rendering() {
    let flat = FlatMeta::from_meta(&ObjectMeta::default()).expect_err("must fail");
    assert!(matches!(flat, CodecError::MissingField(path) if path.to_string() == "$.id"));

    let nested = NestedMeta::from_meta(&ObjectMeta::default()).expect_err("must fail");
    assert!(matches!(nested, CodecError::MissingField(path) if path.to_string() == "$.metadata.name"));
}
