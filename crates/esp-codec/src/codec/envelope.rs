//! The tag + size framing shared by every subrecord.
//!
//! ```text
//! +--------+-----------+------------------+
//! | tag 4B | size u16  | payload (size B) |
//! +--------+-----------+------------------+
//! ```
//!
//! There is no padding and no alignment; the size field counts only the
//! payload.

use tracing::warn;

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{ENVELOPE_HEADER_LEN, MAX_PAYLOAD_LEN, TAG_LEN};
use crate::model::Tag;

/// One framed subrecord, borrowing its payload from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub tag: Tag,
    pub payload: &'a [u8],
}

impl Envelope<'_> {
    /// Returns the payload size as declared on the wire.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Returns the number of bytes this envelope occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        ENVELOPE_HEADER_LEN + self.payload.len()
    }
}

/// Reads the next envelope.
///
/// Returns `Ok(None)` at the end of a record's subrecord stream, which is
/// whenever fewer than four bytes remain. A tag followed by an incomplete size
/// field or a short payload is [`DecodeError::Truncated`].
pub fn read_envelope<'a>(reader: &mut Reader<'a>) -> Result<Option<Envelope<'a>>, DecodeError> {
    let remaining = reader.remaining_len();
    if remaining < TAG_LEN {
        if remaining > 0 {
            warn!(
                offset = reader.position(),
                trailing = remaining,
                "ignoring trailing bytes shorter than a tag at end of subrecords"
            );
        }
        return Ok(None);
    }

    let tag = reader.read_tag("subrecord tag")?;
    let size = reader.read_u16("subrecord size")? as usize;
    let payload = reader.read_bytes(size, "subrecord payload")?;
    Ok(Some(Envelope { tag, payload }))
}

/// Writes one envelope: tag, little-endian payload length, payload verbatim.
pub fn write_envelope(writer: &mut Writer, tag: Tag, payload: &[u8]) -> Result<(), EncodeError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(EncodeError::PayloadTooLarge {
            tag,
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }
    writer.write_tag(tag);
    writer.write_u16(payload.len() as u16);
    writer.write_bytes(payload);
    Ok(())
}

/// Encodes one envelope into a fresh buffer.
pub fn encode_envelope(tag: Tag, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(ENVELOPE_HEADER_LEN + payload.len());
    write_envelope(&mut writer, tag, payload)?;
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_envelope_roundtrip() {
        let bytes = encode_envelope(Tag::new(b"EDID"), b"Iron\0").unwrap();
        assert_eq!(&bytes, b"EDID\x05\x00Iron\0");

        let mut reader = Reader::new(&bytes);
        let envelope = read_envelope(&mut reader).unwrap().unwrap();
        assert_eq!(envelope.tag, Tag::new(b"EDID"));
        assert_eq!(envelope.payload, b"Iron\0");
        assert_eq!(envelope.encoded_len(), bytes.len());
        assert!(read_envelope(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_empty_input_ends_group() {
        let mut reader = Reader::new(&[]);
        assert_eq!(read_envelope(&mut reader), Ok(None));
    }

    #[test]
    fn test_short_tail_ends_group() {
        let mut reader = Reader::new(b"ED");
        assert_eq!(read_envelope(&mut reader), Ok(None));
    }

    #[test]
    fn test_missing_size_is_truncated() {
        let mut reader = Reader::new(b"EDID\x05");
        let err = read_envelope(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_short_payload_is_truncated() {
        let mut reader = Reader::new(b"DATA\x0c\x00\x01\x02\x03");
        let err = read_envelope(&mut reader).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                context: "subrecord payload",
                needed: 12,
                available: 3,
            }
        );
    }

    #[test]
    fn test_zero_size_envelope() {
        let mut reader = Reader::new(b"DSTF\x00\x00");
        let envelope = read_envelope(&mut reader).unwrap().unwrap();
        assert_eq!(envelope.tag, Tag::new(b"DSTF"));
        assert!(envelope.payload.is_empty());
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![0u8; MAX_PAYLOAD_LEN + 1];
        let err = encode_envelope(Tag::new(b"SCDA"), &payload).unwrap_err();
        assert!(matches!(err, EncodeError::PayloadTooLarge { len, .. } if len == MAX_PAYLOAD_LEN + 1));

        let payload = vec![0u8; MAX_PAYLOAD_LEN];
        let bytes = encode_envelope(Tag::new(b"SCDA"), &payload).unwrap();
        assert_eq!(&bytes[4..6], &[0xff, 0xff]);
    }
}
