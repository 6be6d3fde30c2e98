//! Binary encoding/decoding for subrecords.
//!
//! [`envelope`] frames each subrecord as tag + size + payload, and
//! [`payload`] holds the decoders that interpret the payload bytes.

pub mod envelope;
pub mod payload;
pub mod primitives;

pub use envelope::{encode_envelope, read_envelope, write_envelope, Envelope};
pub use payload::{encode_value, write_value, Decoder};
pub use primitives::{Reader, Writer};
