//! Byte-exact codec for the subrecords of Bethesda ESP/ESM plugin records.
//!
//! A record's payload is a flat stream of tagged, length-prefixed chunks
//! called subrecords. This crate decodes such a payload into owned values
//! and encodes them back into the same bytes.
//!
//! # Overview
//!
//! - **Envelope**: every subrecord is a 4-byte ASCII tag, a little-endian
//!   `u16` size and exactly that many payload bytes.
//! - **Decoders**: a small closed set interprets payloads: packed layouts,
//!   zero-terminated text, homogeneous arrays, enums, form references, raw
//!   bytes and compatibility variants that accept older layouts.
//! - **Record kinds**: each kind binds tags to decoders, directly or through
//!   shared groups reused across kinds (model paths, destruction data...).
//! - **Round trip**: `encode(decode(bytes)) == bytes` for canonical input.
//!
//! # Quick Start
//!
//! ```rust
//! use esp_codec::{Registry, Tag};
//!
//! let registry = Registry::standard().unwrap();
//! let payload = b"EDID\x08\x00KeyBlue\0DATA\x08\x00\x0a\x00\x00\x00\x00\x00\x80\x3f";
//!
//! let record = registry.decode(Tag::new(b"KEYM"), payload).unwrap();
//! assert_eq!(record.editor_id(), Some("KeyBlue"));
//!
//! let data = record.first(Tag::new(b"DATA")).unwrap().value.as_fields().unwrap();
//! assert_eq!(data.int("value"), Some(10));
//! assert_eq!(data.float("weight"), Some(1.0));
//!
//! assert_eq!(record.encode().unwrap(), payload);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Tags, layouts, values, subrecords and records
//! - [`codec`]: Envelope framing and payload decoders
//! - [`schema`]: Shared groups, record kinds, the registry and built-in tables
//! - [`validate`]: Round-trip checks
//! - [`error`]: Error types
//! - [`limits`]: Fixed sizes of the wire format
//!
//! # Input handling
//!
//! Decoding never trusts declared sizes: a size that runs past the end of the
//! buffer is a truncation error, and fixed layouts reject any other size.
//! Unknown tags are errors rather than being skipped, so nothing is silently
//! dropped on re-encode.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod schema;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{Decoder, Reader, Writer};
pub use error::{DecodeError, EncodeError, ErrorKind, SchemaError, ValidationError};
pub use model::{
    Compat, EnumTable, EnumValue, FieldKind, FieldValue, Fields, FormId, Layout, Record, Scalar,
    ScalarKind, Subrecord, Tag, Value,
};
pub use schema::{RecordKind, Registry, SharedGroup};
pub use validate::{check_round_trip, RoundTrip};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
