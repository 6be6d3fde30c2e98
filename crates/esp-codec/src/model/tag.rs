//! Four-byte identifiers: subrecord tags and form references.
//!
//! Both are stored as raw bytes. A [`Tag`] names the kind of a subrecord (or
//! of a record) and is always ASCII in well-formed files; a [`FormId`] points
//! at another record and is never interpreted by this crate.

use std::fmt;

use crate::limits::{FORM_ID_LEN, TAG_LEN};

/// A 4-byte subrecord or record identifier, e.g. `EDID`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub [u8; TAG_LEN]);

impl Tag {
    /// Creates a tag from its wire bytes.
    pub const fn new(bytes: &[u8; TAG_LEN]) -> Self {
        Tag(*bytes)
    }

    /// Returns the wire bytes.
    pub const fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Returns true if every byte is printable ASCII.
    pub fn is_ascii(&self) -> bool {
        self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ')
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ascii() {
            // Checked above: every byte is ASCII.
            for &b in &self.0 {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(
                f,
                "0x{:02x}{:02x}{:02x}{:02x}",
                self.0[0], self.0[1], self.0[2], self.0[3]
            )
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl From<[u8; TAG_LEN]> for Tag {
    fn from(bytes: [u8; TAG_LEN]) -> Self {
        Tag(bytes)
    }
}

impl PartialEq<[u8; TAG_LEN]> for Tag {
    fn eq(&self, other: &[u8; TAG_LEN]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8; TAG_LEN]> for Tag {
    fn eq(&self, other: &&[u8; TAG_LEN]) -> bool {
        &self.0 == *other
    }
}

/// An opaque reference to another record.
///
/// Stored and re-emitted verbatim. Zero is the conventional null reference.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FormId(pub [u8; FORM_ID_LEN]);

/// The null form reference.
pub const NULL_FORM_ID: FormId = FormId([0u8; FORM_ID_LEN]);

impl FormId {
    /// Returns the reference as the little-endian integer the game uses.
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Creates a reference from its little-endian integer form.
    pub fn from_u32(value: u32) -> Self {
        FormId(value.to_le_bytes())
    }

    /// Returns true for the null reference.
    pub fn is_null(self) -> bool {
        self == NULL_FORM_ID
    }
}

impl fmt::Debug for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormId({:08X})", self.to_u32())
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.to_u32())
    }
}
