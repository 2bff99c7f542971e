use super::{canonical_json_bytes, fingerprint_hex, FingerprintOptions};
use serde_json::json;

#[test]
fn canonical_bytes_sort_nested_keys() {
    let value = json!({"spec": {"nodeName": "n1", "containers": []}, "kind": "Pod"});
    let bytes = canonical_json_bytes(&value, &FingerprintOptions::default()).expect("must encode");
    let text = String::from_utf8(bytes).expect("must be utf8 json");
    assert_eq!(text, r#"{"kind":"Pod","spec":{"containers":[],"nodeName":"n1"}}"#);
}

#[test]
fn fingerprint_ignores_ordering() {
    let left = json!({"b": 2, "a": [{"y": 1, "x": 2}]});
    let right = json!({"a": [{"x": 2, "y": 1}], "b": 2});
    let options = FingerprintOptions::default();
    assert_eq!(
        fingerprint_hex(&left, &options).expect("hash"),
        fingerprint_hex(&right, &options).expect("hash")
    );
}

#[test]
fn ignored_keys_do_not_change_fingerprint() {
    let options = FingerprintOptions::ignoring(["resourceVersion"]);
    let first = json!({"metadata": {"name": "foo", "resourceVersion": "1"}});
    let second = json!({"metadata": {"name": "foo", "resourceVersion": "7"}});
    assert_eq!(
        fingerprint_hex(&first, &options).expect("hash"),
        fingerprint_hex(&second, &options).expect("hash")
    );

    let hash = fingerprint_hex(&first, &FingerprintOptions::default()).expect("hash");
    assert_eq!(hash.len(), 64);
}
