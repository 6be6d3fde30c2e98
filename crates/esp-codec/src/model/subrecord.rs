//! Subrecords and the records that hold them.

use crate::codec::envelope::write_envelope;
use crate::codec::payload::encode_value;
use crate::codec::primitives::Writer;
use crate::error::EncodeError;
use crate::model::{Tag, Value};

/// One decoded tagged chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subrecord {
    pub tag: Tag,
    pub value: Value,
}

impl Subrecord {
    pub fn new(tag: Tag, value: Value) -> Self {
        Self { tag, value }
    }

    /// Encodes the payload only, without tag and size.
    pub fn encode_payload(&self) -> Result<Vec<u8>, EncodeError> {
        encode_value(self.tag, &self.value)
    }

    /// Appends this subrecord's envelope to `writer`.
    pub fn write(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        let payload = self.encode_payload()?;
        write_envelope(writer, self.tag, &payload)
    }

    /// Encodes this subrecord's envelope into a fresh buffer.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

/// An ordered sequence of subrecords belonging to one record.
///
/// Order is significant and preserved on encode; nothing is sorted or
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record kind, e.g. `ARMA`.
    pub kind: Tag,
    pub subrecords: Vec<Subrecord>,
}

impl Record {
    pub fn new(kind: Tag) -> Self {
        Self {
            kind,
            subrecords: Vec::new(),
        }
    }

    /// Returns the first subrecord with the given tag.
    pub fn first(&self, tag: Tag) -> Option<&Subrecord> {
        self.subrecords.iter().find(|s| s.tag == tag)
    }

    /// Iterates over every subrecord with the given tag, in order.
    pub fn all(&self, tag: Tag) -> impl Iterator<Item = &Subrecord> + '_ {
        self.subrecords.iter().filter(move |s| s.tag == tag)
    }

    /// Returns the editor ID (`EDID`), if present and valid UTF-8.
    pub fn editor_id(&self) -> Option<&str> {
        self.first(Tag::new(b"EDID"))?.value.as_text()
    }

    pub fn len(&self) -> usize {
        self.subrecords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subrecords.is_empty()
    }

    /// Encodes the record payload: every subrecord envelope, in order.
    ///
    /// The record header belongs to the container format and is not written.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new();
        for subrecord in &self.subrecords {
            subrecord.write(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormId;

    #[test]
    fn test_subrecord_encode() {
        let sub = Subrecord::new(Tag::new(b"FULL"), Value::text("Iron"));
        assert_eq!(sub.encode().unwrap(), b"FULL\x05\x00Iron\0");
    }

    #[test]
    fn test_record_encode_preserves_order() {
        let mut record = Record::new(Tag::new(b"KEYM"));
        record
            .subrecords
            .push(Subrecord::new(Tag::new(b"EDID"), Value::text("Key")));
        record
            .subrecords
            .push(Subrecord::new(Tag::new(b"SCRI"), Value::FormId(FormId([1, 0, 0, 0]))));
        record
            .subrecords
            .push(Subrecord::new(Tag::new(b"EDID"), Value::text("Key")));

        let bytes = record.encode().unwrap();
        assert_eq!(
            bytes,
            b"EDID\x04\x00Key\0SCRI\x04\x00\x01\x00\x00\x00EDID\x04\x00Key\0".to_vec()
        );
        assert_eq!(record.editor_id(), Some("Key"));
        assert_eq!(record.all(Tag::new(b"EDID")).count(), 2);
    }

    #[test]
    fn test_empty_record_encodes_to_nothing() {
        let record = Record::new(Tag::new(b"ARMA"));
        assert!(record.encode().unwrap().is_empty());
        assert!(record.is_empty());
    }
}
