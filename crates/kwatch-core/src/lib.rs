pub mod codec;
pub mod event;
pub mod field_path;
pub mod fingerprint;
pub mod issues;

pub use codec::{CodecError, JsonCodec, ObjectCodec};
pub use event::{Event, EventType, ParseEventTypeError};
pub use field_path::FieldPath;
pub use fingerprint::{canonical_json_bytes, fingerprint_hex, FingerprintOptions};
pub use issues::{IssueSeverity, StructuredIssue};
