//! Round-trip checks.
//!
//! Decoding and re-encoding a canonical payload must reproduce it byte for
//! byte. These helpers run the cycle and report where the output first
//! diverges, which is how schema mistakes (a wrong field width, a missing
//! legacy shape) show up in practice.
//!
//! Two inputs legitimately diverge: legacy shapes of a compatibility
//! decoder, which re-encode in the canonical layout, and text payloads with
//! a missing terminator or bytes after it.

use crate::codec::payload::Decoder;
use crate::error::ValidationError;
use crate::model::{Record, Tag};
use crate::schema::RecordKind;

/// Outcome of decoding and re-encoding one record payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    pub record: Record,
    pub encoded: Vec<u8>,
    /// Offset of the first differing byte, or of the end of the shorter
    /// buffer when one is a prefix of the other.
    pub first_difference: Option<usize>,
}

impl RoundTrip {
    /// Returns true if the re-encoded bytes equal the input.
    pub fn is_identical(&self) -> bool {
        self.first_difference.is_none()
    }
}

/// Decodes `payload` as a record of `kind`, re-encodes it and compares.
pub fn check_round_trip(kind: &RecordKind, payload: &[u8]) -> Result<RoundTrip, ValidationError> {
    let record = kind.decode(payload)?;
    let encoded = record.encode()?;
    let first_difference = first_difference(payload, &encoded);
    Ok(RoundTrip {
        record,
        encoded,
        first_difference,
    })
}

/// Runs one payload through `decoder` and back.
///
/// Also checks the reverse direction: the re-encoded bytes must decode to
/// the same value.
pub fn check_payload(decoder: Decoder, tag: Tag, payload: &[u8]) -> Result<Option<usize>, ValidationError> {
    let value = decoder.decode(tag, payload)?;
    let encoded = decoder.encode(tag, &value)?;
    let again = decoder.decode(tag, &encoded)?;
    if again != value {
        return Ok(Some(first_difference(payload, &encoded).unwrap_or(0)));
    }
    Ok(first_difference(payload, &encoded))
}

/// Returns the first offset at which `a` and `b` differ.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}
