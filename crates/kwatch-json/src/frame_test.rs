use super::{encode_frame_line, parse_frame_line, WatchFrame};
use kwatch_core::EventType;
use serde_json::json;

#[test]
fn frame_line_is_one_compact_object() {
    let frame = WatchFrame::new(EventType::Added, json!({"name": "foo"}));
    let line = encode_frame_line(&frame).expect("must encode");
    assert_eq!(
        String::from_utf8(line).expect("utf8"),
        "{\"type\":\"ADDED\",\"object\":{\"name\":\"foo\"}}\n"
    );
}

#[test]
fn object_fields_named_type_stay_nested() {
    let frame = WatchFrame::new(EventType::Deleted, json!({"type": "ADDED", "object": 1}));
    let line = encode_frame_line(&frame).expect("must encode");
    let decoded = parse_frame_line(std::str::from_utf8(&line).expect("utf8")).expect("must decode");
    assert_eq!(decoded, frame);
    assert_eq!(decoded.event_type, EventType::Deleted);
}

#[test]
fn envelope_rejects_extra_or_missing_fields() {
    assert!(parse_frame_line(r#"{"type":"ADDED","object":{},"extra":1}"#).is_err());
    assert!(parse_frame_line(r#"{"type":"ADDED"}"#).is_err());
    assert!(parse_frame_line(r#"{"object":{}}"#).is_err());
    assert!(parse_frame_line(r#"{"type":"CREATED","object":{}}"#).is_err());
}
