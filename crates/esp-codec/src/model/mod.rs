//! Data model types for ESP subrecords.
//!
//! This module contains the in-memory side of the format:
//! - Tags and form references
//! - Layouts, enum tables and compatibility variants (declarative shapes)
//! - Values (decoded payloads)
//! - Subrecords and records
//! - Builders (ergonomic construction)

pub mod builder;
pub mod layout;
pub mod subrecord;
pub mod tag;
pub mod value;

pub use builder::{FieldsBuilder, RecordBuilder};
pub use layout::{field, Compat, EnumTable, FieldKind, FieldSpec, Layout, ScalarKind};
pub use subrecord::{Record, Subrecord};
pub use tag::{FormId, Tag, NULL_FORM_ID};
pub use value::{EnumValue, FieldValue, Fields, Scalar, Value};
