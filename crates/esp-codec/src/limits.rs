//! Fixed sizes of the subrecord wire format.

/// Length of a subrecord tag.
pub const TAG_LEN: usize = 4;

/// Length of the little-endian size field following the tag.
pub const SIZE_LEN: usize = 2;

/// Tag plus size field.
pub const ENVELOPE_HEADER_LEN: usize = TAG_LEN + SIZE_LEN;

/// Largest payload a single envelope can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Length of an opaque form reference.
pub const FORM_ID_LEN: usize = 4;
