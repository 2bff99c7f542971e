use super::transcode;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DecodeError, EncodeError, TranscodeError};
use kwatch_api::{ApiVersion, Pod, SchemeCodec, Service};
use kwatch_core::Event;
use std::io::Cursor;

#[test]
fn moves_a_stream_between_versions() {
    let mut pod = Pod::named("foo");
    pod.spec.node_name = "node-a".to_string();
    let events = vec![Event::added(pod.clone()), Event::modified(pod.clone()), Event::deleted(pod)];

    let mut source = Encoder::new(Vec::new(), SchemeCodec::<Pod>::new(ApiVersion::V1Beta1));
    for event in &events {
        source.encode(event).expect("must encode");
    }

    let mut decoder = Decoder::new(
        Cursor::new(source.into_inner()),
        SchemeCodec::<Pod>::new(ApiVersion::V1Beta1),
    );
    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Pod>::new(ApiVersion::V1));
    assert_eq!(transcode(&mut decoder, &mut encoder).expect("must transcode"), 3);

    let converted = String::from_utf8(encoder.into_inner()).expect("utf8");
    assert!(converted.contains("\"nodeName\":\"node-a\""));
    assert!(!converted.contains("\"host\""));

    let decoded = Decoder::new(
        Cursor::new(converted.into_bytes()),
        SchemeCodec::<Pod>::new(ApiVersion::V1),
    )
    .collect::<Result<Vec<_>, _>>()
    .expect("must decode");
    assert_eq!(decoded, events);
}

#[test]
fn reports_frames_copied_before_failure() {
    let mut source = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1));
    source
        .encode(&Event::added(Service::named("frontend", 80)))
        .expect("must encode");
    let mut bytes = source.into_inner();
    bytes.extend_from_slice(b"{broken");

    let mut decoder = Decoder::new(Cursor::new(bytes), SchemeCodec::<Service>::new(ApiVersion::V1));
    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1Beta2));
    match transcode(&mut decoder, &mut encoder) {
        Err(TranscodeError::Decode {
            frames: 1,
            source: DecodeError::Malformed(_) | DecodeError::Truncated(_),
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn target_version_without_the_kind_fails_on_encode() {
    let mut source = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1));
    source
        .encode(&Event::added(Service::named("frontend", 80)))
        .expect("must encode");

    let mut decoder = Decoder::new(
        Cursor::new(source.into_inner()),
        SchemeCodec::<Service>::new(ApiVersion::V1),
    );
    let mut encoder = Encoder::new(Vec::new(), SchemeCodec::<Service>::new(ApiVersion::V1Beta1));
    let error = transcode(&mut decoder, &mut encoder).expect_err("must fail");
    assert!(matches!(
        error,
        TranscodeError::Encode {
            frames: 0,
            source: EncodeError::Object { .. }
        }
    ));
}
