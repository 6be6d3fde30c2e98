//! Primitive encoding/decoding for the subrecord wire format.
//!
//! Everything on the wire is fixed width and little-endian.

use crate::error::DecodeError;
use crate::model::{FormId, Tag};

// =============================================================================
// DECODING
// =============================================================================

/// Forward-only cursor over a subrecord buffer.
///
/// Every read is bounds checked; a short read fails with
/// [`DecodeError::Truncated`] and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread tail of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Takes the next `n` bytes, or fails without moving.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::Truncated {
                context,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Takes the next `N` bytes as an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let [b] = self.read_array::<1>(context)?;
        Ok(b)
    }

    #[inline]
    pub fn read_i8(&mut self, context: &'static str) -> Result<i8, DecodeError> {
        Ok(i8::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian f32. NaN payloads are kept bit for bit.
    #[inline]
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a 4-byte tag.
    #[inline]
    pub fn read_tag(&mut self, context: &'static str) -> Result<Tag, DecodeError> {
        Ok(Tag(self.read_array(context)?))
    }

    /// Reads a 4-byte form reference.
    #[inline]
    pub fn read_form_id(&mut self, context: &'static str) -> Result<FormId, DecodeError> {
        Ok(FormId(self.read_array(context)?))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Growable output buffer for encoded subrecords.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Consumes the writer, yielding the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends bytes verbatim.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a 4-byte tag.
    #[inline]
    pub fn write_tag(&mut self, tag: Tag) {
        self.buf.extend_from_slice(tag.as_bytes());
    }

    /// Writes a 4-byte form reference.
    #[inline]
    pub fn write_form_id(&mut self, id: FormId) {
        self.buf.extend_from_slice(&id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        let mut writer = Writer::new();
        writer.write_u16(0x0102);
        writer.write_u32(0x0304_0506);
        writer.write_i16(-2);
        assert_eq!(writer.as_bytes(), &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0xfe, 0xff]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u16("test").unwrap(), 0x0102);
        assert_eq!(reader.read_u32("test").unwrap(), 0x0304_0506);
        assert_eq!(reader.read_i16("test").unwrap(), -2);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_f32_roundtrip() {
        let test_values = [0.0f32, -0.0, 1.0, -1.0, 5.5, f32::INFINITY, f32::MIN_POSITIVE];

        for v in test_values {
            let mut writer = Writer::new();
            writer.write_f32(v);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_f32("test").unwrap();
            assert_eq!(v.to_bits(), decoded.to_bits(), "failed for {}", v);
        }
    }

    #[test]
    fn test_f32_nan_payload_preserved() {
        let bits = 0x7fc0_1234u32;
        let buf = bits.to_le_bytes();
        let mut reader = Reader::new(&buf);
        let decoded = reader.read_f32("test").unwrap();
        assert_eq!(decoded.to_bits(), bits);
    }

    #[test]
    fn test_tag_and_form_id() {
        let mut writer = Writer::new();
        writer.write_tag(Tag::new(b"SCRO"));
        writer.write_form_id(FormId([1, 2, 3, 4]));

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_tag("tag").unwrap(), Tag::new(b"SCRO"));
        assert_eq!(reader.read_form_id("form").unwrap(), FormId([1, 2, 3, 4]));
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        let result = reader.read_bytes(10, "test");
        assert_eq!(
            result,
            Err(DecodeError::Truncated {
                context: "test",
                needed: 10,
                available: 5
            })
        );
        // A failed read does not move the cursor.
        assert_eq!(reader.position(), 0);
    }
}
