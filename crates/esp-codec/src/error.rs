//! Error types for subrecord decoding, encoding and schema registration.

use thiserror::Error;

use crate::model::Tag;

/// Broad error categories shared by decode and encode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The buffer ended before an envelope or field was complete.
    TruncatedInput,
    /// A payload's declared size disagrees with its decoder's width.
    SizeMismatch,
    /// A tag has no decoder in the record kind or its attached groups.
    UnsupportedSubrecordKind,
    /// An enumerated scalar holds a value with no name.
    ValueOutOfDomain,
    /// A value handed to an encoder is internally inconsistent.
    InvariantViolation,
}

impl ErrorKind {
    /// Returns the kind's name (e.g., "TruncatedInput").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TruncatedInput => "TruncatedInput",
            ErrorKind::SizeMismatch => "SizeMismatch",
            ErrorKind::UnsupportedSubrecordKind => "UnsupportedSubrecordKind",
            ErrorKind::ValueOutOfDomain => "ValueOutOfDomain",
            ErrorKind::InvariantViolation => "InvariantViolation",
        }
    }

    /// Returns true for errors caused by bad input rather than bad values.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ErrorKind::InvariantViolation)
    }
}

/// Error during subrecord decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}: needed {needed} bytes, {available} available")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("{tag} payload is {actual} bytes, expected {expected}")]
    SizeMismatch {
        tag: Tag,
        expected: usize,
        actual: usize,
    },

    #[error("{tag} payload of {size} bytes is not a multiple of the element width {element_width}")]
    MisalignedArray {
        tag: Tag,
        size: usize,
        element_width: usize,
    },

    #[error("unsupported subrecord {tag} in {scope}")]
    UnsupportedSubrecord { scope: String, tag: Tag },

    #[error("{tag} enumeration {enumeration} has non-integer width {width}")]
    NonIntegerEnum {
        tag: Tag,
        enumeration: &'static str,
        width: &'static str,
    },

    #[error("{tag} value {value} is not a member of {enumeration}")]
    ValueOutOfDomain {
        tag: Tag,
        enumeration: &'static str,
        value: i64,
    },
}

impl DecodeError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Truncated { .. } => ErrorKind::TruncatedInput,
            DecodeError::SizeMismatch { .. } | DecodeError::MisalignedArray { .. } => {
                ErrorKind::SizeMismatch
            }
            DecodeError::UnsupportedSubrecord { .. } => ErrorKind::UnsupportedSubrecordKind,
            DecodeError::ValueOutOfDomain { .. } | DecodeError::NonIntegerEnum { .. } => {
                ErrorKind::ValueOutOfDomain
            }
        }
    }

    /// Returns the subrecord tag the error concerns, if known.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            DecodeError::Truncated { .. } => None,
            DecodeError::SizeMismatch { tag, .. }
            | DecodeError::MisalignedArray { tag, .. }
            | DecodeError::UnsupportedSubrecord { tag, .. }
            | DecodeError::ValueOutOfDomain { tag, .. }
            | DecodeError::NonIntegerEnum { tag, .. } => Some(*tag),
        }
    }
}

/// Error during subrecord encoding.
///
/// Every variant signals a value that the matching decoder could never have
/// produced, so all of them share [`ErrorKind::InvariantViolation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{tag} payload length {len} exceeds maximum {max}")]
    PayloadTooLarge { tag: Tag, len: usize, max: usize },

    #[error("{tag} holds a {found} value but its decoder expects {expected}")]
    ShapeMismatch {
        tag: Tag,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{tag} layout {layout} has {expected} fields, value has {actual}")]
    FieldCount {
        tag: Tag,
        layout: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{tag} field {field} expects {expected}, found {found}")]
    FieldMismatch {
        tag: Tag,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{tag} field {field} must be {expected} bytes, found {actual}")]
    FieldWidth {
        tag: Tag,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{tag} value {value} is not a member of {enumeration}")]
    EnumOutOfDomain {
        tag: Tag,
        enumeration: &'static str,
        value: i64,
    },

    #[error("{tag} text contains an interior zero byte at offset {offset}")]
    InteriorNul { tag: Tag, offset: usize },
}

impl EncodeError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvariantViolation
    }
}

/// Error while registering record kinds and shared groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{record}: tag {tag} bound by both {first} and {second}")]
    DuplicateTag {
        record: Tag,
        tag: Tag,
        first: String,
        second: String,
    },

    #[error("record kind {tag} registered twice")]
    DuplicateRecordKind { tag: Tag },

    #[error("{tag}: array element width is zero")]
    ZeroWidthElement { tag: Tag },

    #[error("{tag}: legacy field {field} has no matching canonical field of the same kind")]
    LegacyFieldMismatch { tag: Tag, field: &'static str },

    #[error("{tag}: field {field} is missing from a legacy shape and {enumeration} has no zero member to fill it")]
    LegacyEnumWithoutZero {
        tag: Tag,
        field: &'static str,
        enumeration: &'static str,
    },

    #[error("{tag}: legacy width {width} collides with another shape of the same tag")]
    LegacyWidthCollision { tag: Tag, width: usize },

    #[error("enumeration {enumeration}: value {value} does not fit its {width}-byte width")]
    EnumValueOutOfRange {
        enumeration: &'static str,
        value: i64,
        width: usize,
    },
}

/// Error while checking that a payload survives a decode/encode cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("re-encode failed: {0}")]
    Encode(#[from] EncodeError),
}

impl ValidationError {
    /// Returns the category of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Decode(e) => e.kind(),
            ValidationError::Encode(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_kinds() {
        let tag = Tag::new(b"DATA");
        let truncated = DecodeError::Truncated {
            context: "payload",
            needed: 12,
            available: 3,
        };
        assert_eq!(truncated.kind(), ErrorKind::TruncatedInput);
        assert_eq!(truncated.tag(), None);

        let misaligned = DecodeError::MisalignedArray {
            tag,
            size: 7,
            element_width: 4,
        };
        assert_eq!(misaligned.kind(), ErrorKind::SizeMismatch);
        assert_eq!(misaligned.tag(), Some(tag));
    }

    #[test]
    fn test_error_messages_name_the_tag() {
        let err = DecodeError::SizeMismatch {
            tag: Tag::new(b"OBND"),
            expected: 12,
            actual: 10,
        };
        assert_eq!(err.to_string(), "OBND payload is 10 bytes, expected 12");

        let err = DecodeError::UnsupportedSubrecord {
            scope: "ARMA".to_string(),
            tag: Tag::new(b"ZZZZ"),
        };
        assert_eq!(err.to_string(), "unsupported subrecord ZZZZ in ARMA");
    }

    #[test]
    fn test_encode_errors_are_invariant_violations() {
        let err = EncodeError::PayloadTooLarge {
            tag: Tag::new(b"SCDA"),
            len: 70_000,
            max: 65_535,
        };
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert!(!err.kind().is_input_error());
        assert!(ErrorKind::SizeMismatch.is_input_error());
    }
}
