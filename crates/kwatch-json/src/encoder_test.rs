use super::Encoder;
use crate::error::EncodeError;
use crate::frame::parse_frame_line;
use kwatch_api::{ApiVersion, Pod, SchemeCodec, Service};
use kwatch_core::{CodecError, Event, EventType, JsonCodec};
use serde_json::json;
use std::io::{self, Write};

/// Sink that accepts `limit` bytes, then fails every write.
struct FailingSink {
    written: Vec<u8>,
    limit: usize,
    flushes: usize,
}

impl FailingSink {
    fn new(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            limit,
            flushes: 0,
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.written.len());
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"));
        }
        let accepted = room.min(buf.len());
        self.written.extend_from_slice(&buf[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[test]
fn writes_one_newline_terminated_frame_per_event() {
    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Pod>::new(ApiVersion::V1));
    encoder.encode(&Event::added(Pod::named("foo"))).expect("must encode");
    encoder.encode(&Event::deleted(Pod::named("foo"))).expect("must encode");
    assert_eq!(encoder.frames_written(), 2);

    let text = String::from_utf8(encoder.into_inner()).expect("utf8");
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(text.ends_with('\n'));

    let first = parse_frame_line(lines[0]).expect("must parse");
    assert_eq!(first.event_type, EventType::Added);
    assert_eq!(first.object["kind"], "Pod");
    assert_eq!(first.object["metadata"]["name"], "foo");
    assert_eq!(parse_frame_line(lines[1]).expect("must parse").event_type, EventType::Deleted);
}

#[test]
fn flushes_after_every_frame() {
    let mut encoder = Encoder::new(FailingSink::new(usize::MAX), JsonCodec::<serde_json::Value>::new());
    for index in 0..3 {
        encoder
            .encode(&Event::modified(json!({"index": index})))
            .expect("must encode");
    }
    assert_eq!(encoder.get_ref().flushes, 3);
}

#[test]
fn codec_rejection_writes_nothing_and_keeps_stream_usable() {
    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1Beta1));
    let error = encoder
        .encode(&Event::added(Service::named("frontend", 80)))
        .expect_err("v1beta1 has no services");
    assert!(matches!(
        error,
        EncodeError::Object {
            event_type: EventType::Added,
            source: CodecError::UnsupportedKind { .. }
        }
    ));
    assert!(encoder.get_ref().is_empty());
    assert!(!encoder.is_corrupted());

    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1));
    assert!(encoder.encode(&Event::added(Service::named("broken", 0))).is_err());
    encoder
        .encode(&Event::added(Service::named("frontend", 80)))
        .expect("later events still encode");
    let text = String::from_utf8(encoder.into_inner()).expect("utf8");
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn unnamed_object_fails_before_touching_the_sink() {
    for version in ApiVersion::ALL {
        let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Pod>::new(version));
        let error = encoder
            .encode(&Event::added(Pod::default()))
            .expect_err("unnamed pods cannot be decoded back");
        assert!(matches!(
            error,
            EncodeError::Object {
                source: CodecError::MissingField(_),
                ..
            }
        ));
        assert!(encoder.get_ref().is_empty(), "{version} wrote bytes");
        assert!(!encoder.is_corrupted());
        assert_eq!(encoder.frames_written(), 0);
    }

    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1Beta2));
    assert!(encoder.encode(&Event::added(Service::named("", 80))).is_err());
    assert!(encoder.get_ref().is_empty());
}

#[test]
fn partial_write_marks_stream_corrupted() {
    let mut encoder = Encoder::new(FailingSink::new(10), JsonCodec::<serde_json::Value>::new());
    let error = encoder
        .encode(&Event::added(json!({"name": "foo"})))
        .expect_err("sink must fail");
    assert!(matches!(error, EncodeError::Write(ref io) if io.kind() == io::ErrorKind::BrokenPipe));
    assert!(encoder.is_corrupted());
    assert_eq!(encoder.get_ref().written.len(), 10);

    let error = encoder
        .encode(&Event::deleted(json!({"name": "foo"})))
        .expect_err("stream is corrupted");
    assert!(matches!(error, EncodeError::StreamCorrupted));
    assert_eq!(encoder.frames_written(), 0);
}
