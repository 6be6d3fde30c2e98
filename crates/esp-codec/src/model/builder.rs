//! Builder API for constructing records and packed layouts by hand.
//!
//! # Example
//!
//! ```rust
//! use esp_codec::model::builder::RecordBuilder;
//! use esp_codec::model::{FormId, Tag};
//! use esp_codec::schema::standard::layouts::CONTAINER_DATA;
//!
//! let record = RecordBuilder::new(Tag::new(b"CONT"))
//!     .editor_id("ChestSmall")
//!     .text(Tag::new(b"FULL"), "Chest")
//!     .fields_with(Tag::new(b"DATA"), &CONTAINER_DATA, |f| f
//!         .int("flags", 1)
//!         .float("weight", 10.0)
//!     )
//!     .form_id(Tag::new(b"SNAM"), FormId::from_u32(0x0001_2345))
//!     .build();
//!
//! assert_eq!(record.len(), 4);
//! assert_eq!(record.editor_id(), Some("ChestSmall"));
//! ```

use crate::model::{
    EnumValue, FieldKind, FieldValue, Fields, FormId, Layout, Record, Scalar, Subrecord, Tag,
    Value,
};

/// Builder for the values of one packed layout.
///
/// Starts from the all-zero value of the layout. Setters that name a missing
/// field, or pass a value the field cannot hold, poison the builder and
/// [`build`](FieldsBuilder::build) returns `None`.
#[derive(Debug, Clone)]
pub struct FieldsBuilder {
    fields: Fields,
    valid: bool,
}

impl FieldsBuilder {
    /// Creates a builder holding the zero value of `layout`.
    pub fn new(layout: &'static Layout) -> Self {
        Self {
            fields: Fields::zeroed(layout),
            valid: true,
        }
    }

    fn kind_of(&self, name: &str) -> Option<FieldKind> {
        let layout = self.fields.layout();
        layout.field_index(name).map(|i| layout.fields[i].kind)
    }

    fn put(mut self, name: &str, value: Option<FieldValue>) -> Self {
        let stored = match (self.kind_of(name), value) {
            (Some(kind), Some(value)) if value.matches(&kind) => self.fields.set(name, value),
            _ => false,
        };
        self.valid &= stored;
        self
    }

    /// Sets an integer field (scalar or enum) from its raw value.
    pub fn int(self, name: &str, value: i64) -> Self {
        let converted = match self.kind_of(name) {
            Some(FieldKind::Scalar(kind)) => Scalar::from_i64(kind, value).map(FieldValue::Scalar),
            Some(FieldKind::Enum(table)) => EnumValue::from_raw(table, value).map(FieldValue::Enum),
            _ => None,
        };
        self.put(name, converted)
    }

    /// Sets an `f32` field.
    pub fn float(self, name: &str, value: f32) -> Self {
        self.put(name, Some(FieldValue::Scalar(Scalar::F32(value))))
    }

    /// Sets a fixed byte span; the length must match the field width.
    pub fn bytes(self, name: &str, value: impl Into<Vec<u8>>) -> Self {
        self.put(name, Some(FieldValue::Bytes(value.into())))
    }

    /// Sets a form reference field.
    pub fn form_id(self, name: &str, value: FormId) -> Self {
        self.put(name, Some(FieldValue::FormId(value)))
    }

    /// Sets an enum field by member name.
    pub fn variant(self, name: &str, member: &str) -> Self {
        let value = match self.kind_of(name) {
            Some(FieldKind::Enum(table)) => EnumValue::named(table, member).map(FieldValue::Enum),
            _ => None,
        };
        self.put(name, value)
    }

    /// Returns the fields, or `None` if any setter was rejected.
    pub fn build(self) -> Option<Fields> {
        self.valid.then_some(self.fields)
    }
}

/// Builder for a [`Record`]. Subrecords are kept in the order they are added.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
    valid: bool,
}

impl RecordBuilder {
    pub fn new(kind: Tag) -> Self {
        Self {
            record: Record::new(kind),
            valid: true,
        }
    }

    /// Appends an already built subrecord.
    pub fn subrecord(mut self, subrecord: Subrecord) -> Self {
        self.record.subrecords.push(subrecord);
        self
    }

    /// Appends a subrecord from a tag and value.
    pub fn value(self, tag: Tag, value: Value) -> Self {
        self.subrecord(Subrecord::new(tag, value))
    }

    /// Appends an `EDID` editor ID.
    pub fn editor_id(self, id: &str) -> Self {
        self.text(Tag::new(b"EDID"), id)
    }

    /// Appends a text subrecord.
    pub fn text(self, tag: Tag, text: &str) -> Self {
        self.value(tag, Value::text(text))
    }

    pub fn scalar(self, tag: Tag, value: Scalar) -> Self {
        self.value(tag, Value::Scalar(value))
    }

    pub fn form_id(self, tag: Tag, id: FormId) -> Self {
        self.value(tag, Value::FormId(id))
    }

    pub fn enum_value(self, tag: Tag, value: EnumValue) -> Self {
        self.value(tag, Value::Enum(value))
    }

    pub fn raw(self, tag: Tag, bytes: impl Into<Vec<u8>>) -> Self {
        self.value(tag, Value::Raw(bytes.into()))
    }

    pub fn array(self, tag: Tag, items: impl IntoIterator<Item = FieldValue>) -> Self {
        self.value(tag, Value::Array(items.into_iter().collect()))
    }

    pub fn string_list<I, S>(self, tag: Tag, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = items.into_iter().map(|s| s.as_ref().as_bytes().to_vec()).collect();
        self.value(tag, Value::StringList(items))
    }

    pub fn fields(self, tag: Tag, fields: Fields) -> Self {
        self.value(tag, Value::Fields(fields))
    }

    /// Appends a packed layout built with a [`FieldsBuilder`].
    ///
    /// A rejected field setter makes [`try_build`](RecordBuilder::try_build)
    /// fail; [`build`](RecordBuilder::build) keeps the zero value instead.
    pub fn fields_with<F>(mut self, tag: Tag, layout: &'static Layout, f: F) -> Self
    where
        F: FnOnce(FieldsBuilder) -> FieldsBuilder,
    {
        let builder = f(FieldsBuilder::new(layout));
        self.valid &= builder.valid;
        self.fields(tag, builder.fields)
    }

    /// Appends a zero-size marker subrecord.
    pub fn marker(self, tag: Tag, layout: &'static Layout) -> Self {
        self.fields(tag, Fields::zeroed(layout))
    }

    pub fn build(self) -> Record {
        self.record
    }

    /// Returns the record, or `None` if any field setter was rejected.
    pub fn try_build(self) -> Option<Record> {
        self.valid.then_some(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{field, EnumTable, ScalarKind};

    const MOOD: EnumTable = EnumTable::new("Mood", ScalarKind::U8, &[(0, "Neutral"), (3, "Frenzied")]);

    const AI: Layout = Layout::new(
        "AiData",
        &[
            field("aggression", FieldKind::Scalar(ScalarKind::U8)),
            field("mood", FieldKind::Enum(&MOOD)),
            field("unused", FieldKind::Bytes(2)),
            field("package", FieldKind::FormId),
            field("speed", FieldKind::Scalar(ScalarKind::F32)),
        ],
    );

    const MARKER: Layout = Layout::new("Marker", &[]);

    #[test]
    fn test_fields_builder_basic() {
        let fields = FieldsBuilder::new(&AI)
            .int("aggression", 70)
            .variant("mood", "Frenzied")
            .bytes("unused", [0xcd, 0xcd])
            .form_id("package", FormId::from_u32(0x14))
            .float("speed", 1.5)
            .build()
            .unwrap();

        assert_eq!(fields.int("aggression"), Some(70));
        assert_eq!(fields.enum_name("mood"), Some("Frenzied"));
        assert_eq!(fields.int("mood"), None);
        assert_eq!(fields.float("speed"), Some(1.5));
    }

    #[test]
    fn test_fields_builder_rejects_bad_setters() {
        assert!(FieldsBuilder::new(&AI).int("aggression", 300).build().is_none());
        assert!(FieldsBuilder::new(&AI).int("missing", 1).build().is_none());
        assert!(FieldsBuilder::new(&AI).bytes("unused", [0]).build().is_none());
        assert!(FieldsBuilder::new(&AI).variant("mood", "Calm").build().is_none());
        assert!(FieldsBuilder::new(&AI).float("aggression", 1.0).build().is_none());
        // Enum fields accept raw values that name a member.
        assert!(FieldsBuilder::new(&AI).int("mood", 3).build().is_some());
        assert!(FieldsBuilder::new(&AI).int("mood", 2).build().is_none());
    }

    #[test]
    fn test_record_builder_order() {
        let record = RecordBuilder::new(Tag::new(b"CREA"))
            .editor_id("Mudcrab")
            .fields_with(Tag::new(b"AIDT"), &AI, |f| f.int("aggression", 5))
            .string_list(Tag::new(b"NIFZ"), ["a.nif", "b.nif", ""])
            .marker(Tag::new(b"DSTF"), &MARKER)
            .build();

        let tags: Vec<_> = record.subrecords.iter().map(|s| s.tag).collect();
        assert_eq!(
            tags,
            [Tag::new(b"EDID"), Tag::new(b"AIDT"), Tag::new(b"NIFZ"), Tag::new(b"DSTF")]
        );
        assert_eq!(record.editor_id(), Some("Mudcrab"));

        let bytes = record.encode().unwrap();
        assert!(bytes.ends_with(b"NIFZ\x0c\x00a.nif\0b.nif\0DSTF\x00\x00"));
    }

    #[test]
    fn test_record_builder_try_build() {
        let ok = RecordBuilder::new(Tag::new(b"CREA"))
            .fields_with(Tag::new(b"AIDT"), &AI, |f| f.int("aggression", 1))
            .try_build();
        assert!(ok.is_some());

        let bad = RecordBuilder::new(Tag::new(b"CREA"))
            .fields_with(Tag::new(b"AIDT"), &AI, |f| f.int("aggression", -1))
            .try_build();
        assert!(bad.is_none());
    }
}
