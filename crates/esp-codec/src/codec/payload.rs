//! Payload decoders: the closed set of value codecs every subrecord uses.
//!
//! A [`Decoder`] turns the payload of one envelope into a [`Value`];
//! [`encode_value`] is its inverse. For every payload a decoder accepts in
//! canonical form, `encode(decode(bytes)) == bytes`, and for every value a
//! decoder produces, `decode(encode(value)) == value`.
//!
//! Two inputs decode successfully without re-encoding byte-identically:
//! legacy shapes of a [`Compat`] decoder (re-encoded in the canonical
//! layout) and text payloads whose first zero byte is not the last byte.

use tracing::{debug, warn};

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError, SchemaError};
use crate::limits::FORM_ID_LEN;
use crate::model::{
    Compat, EnumTable, EnumValue, FieldKind, FieldValue, Fields, Layout, Scalar, ScalarKind, Tag,
    Value,
};

/// How the payload of one tag is decoded.
///
/// Decoders are cheap to copy; layouts and enum tables are `'static` data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoder {
    /// Fixed packed layout; size must equal the layout width.
    Layout(&'static Layout),
    /// One scalar; size must equal its width.
    Scalar(ScalarKind),
    /// Zero-terminated text.
    Text,
    /// Homogeneous array; size must be a multiple of the element width.
    Array(FieldKind),
    /// Zero-delimited list of strings.
    StringList,
    /// Enumerated scalar.
    Enum(&'static EnumTable),
    /// Opaque 4-byte form reference.
    FormId,
    /// Any payload, kept verbatim.
    Raw,
    /// Canonical layout plus legacy layouts selected by size.
    Compat(&'static Compat),
}

impl Decoder {
    /// Returns the payload size this decoder requires, or `None` if variable.
    ///
    /// For [`Decoder::Compat`] this is the canonical width; legacy widths are
    /// also accepted on decode.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Decoder::Layout(layout) => Some(layout.width()),
            Decoder::Scalar(kind) => Some(kind.width()),
            Decoder::Enum(table) => Some(table.width.width()),
            Decoder::FormId => Some(FORM_ID_LEN),
            Decoder::Compat(compat) => Some(compat.canonical.width()),
            Decoder::Text | Decoder::Array(_) | Decoder::StringList | Decoder::Raw => None,
        }
    }

    /// Returns a short name for the decoder, used in errors and logs.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Decoder::Layout(_) | Decoder::Compat(_) => "layout",
            Decoder::Scalar(_) => "scalar",
            Decoder::Text => "text",
            Decoder::Array(_) => "array",
            Decoder::StringList => "string list",
            Decoder::Enum(_) => "enum",
            Decoder::FormId => "form id",
            Decoder::Raw => "raw",
        }
    }

    /// Decodes one payload.
    pub fn decode(&self, tag: Tag, payload: &[u8]) -> Result<Value, DecodeError> {
        match self {
            Decoder::Layout(layout) => decode_layout(tag, *layout, payload).map(Value::Fields),
            Decoder::Scalar(kind) => {
                expect_size(tag, kind.width(), payload)?;
                let mut reader = Reader::new(payload);
                read_scalar(&mut reader, *kind).map(Value::Scalar)
            }
            Decoder::Text => Ok(Value::Text(decode_text(tag, payload))),
            Decoder::Array(kind) => decode_array(tag, kind, payload).map(Value::Array),
            Decoder::StringList => Ok(Value::StringList(
                payload.split(|b| *b == 0).map(|s| s.to_vec()).collect(),
            )),
            Decoder::Enum(table) => {
                expect_size(tag, table.width.width(), payload)?;
                let mut reader = Reader::new(payload);
                read_enum(&mut reader, tag, *table).map(Value::Enum)
            }
            Decoder::FormId => {
                expect_size(tag, FORM_ID_LEN, payload)?;
                let mut reader = Reader::new(payload);
                reader.read_form_id("form id").map(Value::FormId)
            }
            Decoder::Raw => Ok(Value::Raw(payload.to_vec())),
            Decoder::Compat(compat) => decode_compat(tag, *compat, payload).map(Value::Fields),
        }
    }

    /// Checks that `value` could have been produced by this decoder.
    pub fn check(&self, tag: Tag, value: &Value) -> Result<(), EncodeError> {
        let mismatch = || EncodeError::ShapeMismatch {
            tag,
            expected: self.shape_name(),
            found: value.shape_name(),
        };

        match (self, value) {
            (Decoder::Layout(layout), Value::Fields(fields)) => check_fields(tag, *layout, fields),
            (Decoder::Compat(compat), Value::Fields(fields)) => {
                check_fields(tag, compat.canonical, fields)
            }
            (Decoder::Scalar(kind), Value::Scalar(s)) if s.kind() == *kind => Ok(()),
            (Decoder::Text, Value::Text(_))
            | (Decoder::StringList, Value::StringList(_))
            | (Decoder::FormId, Value::FormId(_))
            | (Decoder::Raw, Value::Raw(_)) => Ok(()),
            (Decoder::Enum(table), Value::Enum(e)) if e.table == *table => Ok(()),
            (Decoder::Array(kind), Value::Array(items)) => {
                match items.iter().find(|item| !item.matches(kind)) {
                    Some(item) => Err(EncodeError::FieldMismatch {
                        tag,
                        field: "element",
                        expected: kind.name(),
                        found: item.type_name(),
                    }),
                    None => Ok(()),
                }
            }
            _ => Err(mismatch()),
        }
    }

    /// Encodes a value this decoder could have produced.
    pub fn encode(&self, tag: Tag, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.check(tag, value)?;
        encode_value(tag, value)
    }

    pub(crate) fn validate(&self, tag: Tag) -> Result<(), SchemaError> {
        match self {
            Decoder::Layout(layout) => validate_layout(layout),
            Decoder::Array(kind) => {
                if kind.width() == 0 {
                    return Err(SchemaError::ZeroWidthElement { tag });
                }
                validate_kind(kind)
            }
            Decoder::Enum(table) => table.validate(),
            Decoder::Compat(compat) => {
                compat.validate(tag)?;
                validate_layout(compat.canonical)?;
                compat.legacy.iter().try_for_each(|l| validate_layout(l))
            }
            Decoder::Scalar(_) | Decoder::Text | Decoder::StringList | Decoder::FormId | Decoder::Raw => {
                Ok(())
            }
        }
    }
}

fn validate_kind(kind: &FieldKind) -> Result<(), SchemaError> {
    match kind {
        FieldKind::Enum(table) => table.validate(),
        _ => Ok(()),
    }
}

fn validate_layout(layout: &Layout) -> Result<(), SchemaError> {
    layout.fields.iter().try_for_each(|f| validate_kind(&f.kind))
}

// =============================================================================
// DECODING
// =============================================================================

fn expect_size(tag: Tag, expected: usize, payload: &[u8]) -> Result<(), DecodeError> {
    if payload.len() != expected {
        return Err(DecodeError::SizeMismatch {
            tag,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn read_scalar(reader: &mut Reader<'_>, kind: ScalarKind) -> Result<Scalar, DecodeError> {
    Ok(match kind {
        ScalarKind::U8 => Scalar::U8(reader.read_u8("u8")?),
        ScalarKind::I8 => Scalar::I8(reader.read_i8("i8")?),
        ScalarKind::U16 => Scalar::U16(reader.read_u16("u16")?),
        ScalarKind::I16 => Scalar::I16(reader.read_i16("i16")?),
        ScalarKind::U32 => Scalar::U32(reader.read_u32("u32")?),
        ScalarKind::I32 => Scalar::I32(reader.read_i32("i32")?),
        ScalarKind::F32 => Scalar::F32(reader.read_f32("f32")?),
    })
}

fn read_enum(
    reader: &mut Reader<'_>,
    tag: Tag,
    table: &'static EnumTable,
) -> Result<EnumValue, DecodeError> {
    let raw = read_scalar(reader, table.width)?;
    let raw = raw.as_i64().ok_or(DecodeError::NonIntegerEnum {
        tag,
        enumeration: table.name,
        width: table.width.name(),
    })?;
    EnumValue::from_raw(table, raw).ok_or(DecodeError::ValueOutOfDomain {
        tag,
        enumeration: table.name,
        value: raw,
    })
}

fn read_field(reader: &mut Reader<'_>, tag: Tag, kind: &FieldKind) -> Result<FieldValue, DecodeError> {
    Ok(match kind {
        FieldKind::Scalar(kind) => FieldValue::Scalar(read_scalar(reader, *kind)?),
        FieldKind::Bytes(n) => FieldValue::Bytes(reader.read_bytes(*n, "byte span")?.to_vec()),
        FieldKind::FormId => FieldValue::FormId(reader.read_form_id("form id")?),
        FieldKind::Enum(table) => FieldValue::Enum(read_enum(reader, tag, *table)?),
    })
}

fn read_layout(reader: &mut Reader<'_>, tag: Tag, layout: &'static Layout) -> Result<Fields, DecodeError> {
    let mut values = Vec::with_capacity(layout.fields.len());
    for spec in layout.fields {
        values.push(read_field(reader, tag, &spec.kind)?);
    }
    Ok(Fields::new(layout, values))
}

fn decode_layout(tag: Tag, layout: &'static Layout, payload: &[u8]) -> Result<Fields, DecodeError> {
    expect_size(tag, layout.width(), payload)?;
    let mut reader = Reader::new(payload);
    read_layout(&mut reader, tag, layout)
}

fn decode_compat(tag: Tag, compat: &'static Compat, payload: &[u8]) -> Result<Fields, DecodeError> {
    let canonical = compat.canonical;
    if payload.len() == canonical.width() {
        return decode_layout(tag, canonical, payload);
    }

    let Some(legacy) = compat.legacy_for(payload.len()) else {
        return Err(DecodeError::SizeMismatch {
            tag,
            expected: canonical.width(),
            actual: payload.len(),
        });
    };

    debug!(
        %tag,
        legacy = legacy.name,
        canonical = canonical.name,
        size = payload.len(),
        "decoding legacy layout"
    );
    let old = decode_layout(tag, legacy, payload)?;
    Ok(upgrade(canonical, &old))
}

/// Remaps legacy fields into the canonical layout by name, zero-filling the rest.
fn upgrade(canonical: &'static Layout, old: &Fields) -> Fields {
    let values = canonical
        .fields
        .iter()
        .map(|spec| match old.get(spec.name) {
            Some(value) if value.matches(&spec.kind) => value.clone(),
            _ => FieldValue::zero(spec.kind),
        })
        .collect();
    Fields::new(canonical, values)
}

fn decode_text(tag: Tag, payload: &[u8]) -> Vec<u8> {
    match payload.iter().position(|b| *b == 0) {
        Some(end) if end + 1 == payload.len() => payload[..end].to_vec(),
        Some(end) => {
            warn!(%tag, size = payload.len(), terminator = end, "text has bytes after its terminator");
            payload[..end].to_vec()
        }
        None => {
            warn!(%tag, size = payload.len(), "text is missing its terminator");
            payload.to_vec()
        }
    }
}

fn decode_array(tag: Tag, kind: &FieldKind, payload: &[u8]) -> Result<Vec<FieldValue>, DecodeError> {
    let width = kind.width();
    if width == 0 || payload.len() % width != 0 {
        return Err(DecodeError::MisalignedArray {
            tag,
            size: payload.len(),
            element_width: width,
        });
    }

    let mut reader = Reader::new(payload);
    let mut items = Vec::with_capacity(payload.len() / width);
    while !reader.is_empty() {
        items.push(read_field(&mut reader, tag, kind)?);
    }
    Ok(items)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value's payload (without tag and size).
///
/// Values carry their own layouts and enum tables, so no decoder is needed.
/// Use [`Decoder::encode`] to also check the value against a decoder.
pub fn encode_value(tag: Tag, value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    write_value(&mut writer, tag, value)?;
    Ok(writer.into_bytes())
}

/// Writes a value's payload (without tag and size).
pub fn write_value(writer: &mut Writer, tag: Tag, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Fields(fields) => {
            check_fields(tag, fields.layout(), fields)?;
            for value in fields.values() {
                write_field(writer, tag, value)?;
            }
        }
        Value::Scalar(s) => write_scalar(writer, *s),
        Value::Text(text) => {
            check_no_nul(tag, text)?;
            writer.write_bytes(text);
            writer.write_u8(0);
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                if let Some(item) = items.iter().find(|item| !same_type(first, item)) {
                    return Err(EncodeError::FieldMismatch {
                        tag,
                        field: "element",
                        expected: first.type_name(),
                        found: item.type_name(),
                    });
                }
            }
            for item in items {
                write_field(writer, tag, item)?;
            }
        }
        Value::StringList(items) => {
            for (i, item) in items.iter().enumerate() {
                check_no_nul(tag, item)?;
                if i > 0 {
                    writer.write_u8(0);
                }
                writer.write_bytes(item);
            }
        }
        Value::Enum(e) => write_enum(writer, tag, e)?,
        Value::FormId(id) => writer.write_form_id(*id),
        Value::Raw(bytes) => writer.write_bytes(bytes),
    }
    Ok(())
}

fn same_type(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::Scalar(x), FieldValue::Scalar(y)) => x.kind() == y.kind(),
        (FieldValue::Bytes(x), FieldValue::Bytes(y)) => x.len() == y.len(),
        (FieldValue::FormId(_), FieldValue::FormId(_)) => true,
        (FieldValue::Enum(x), FieldValue::Enum(y)) => x.table == y.table,
        _ => false,
    }
}

fn check_no_nul(tag: Tag, bytes: &[u8]) -> Result<(), EncodeError> {
    match bytes.iter().position(|b| *b == 0) {
        Some(offset) => Err(EncodeError::InteriorNul { tag, offset }),
        None => Ok(()),
    }
}

fn check_fields(tag: Tag, layout: &'static Layout, fields: &Fields) -> Result<(), EncodeError> {
    if fields.layout() != layout {
        return Err(EncodeError::ShapeMismatch {
            tag,
            expected: layout.name,
            found: fields.layout().name,
        });
    }
    if fields.values().len() != layout.fields.len() {
        return Err(EncodeError::FieldCount {
            tag,
            layout: layout.name,
            expected: layout.fields.len(),
            actual: fields.values().len(),
        });
    }
    for (spec, value) in layout.fields.iter().zip(fields.values()) {
        if value.matches(&spec.kind) {
            continue;
        }
        return Err(match (value, &spec.kind) {
            (FieldValue::Bytes(b), FieldKind::Bytes(n)) => EncodeError::FieldWidth {
                tag,
                field: spec.name,
                expected: *n,
                actual: b.len(),
            },
            _ => EncodeError::FieldMismatch {
                tag,
                field: spec.name,
                expected: spec.kind.name(),
                found: value.type_name(),
            },
        });
    }
    Ok(())
}

fn write_scalar(writer: &mut Writer, value: Scalar) {
    match value {
        Scalar::U8(v) => writer.write_u8(v),
        Scalar::I8(v) => writer.write_i8(v),
        Scalar::U16(v) => writer.write_u16(v),
        Scalar::I16(v) => writer.write_i16(v),
        Scalar::U32(v) => writer.write_u32(v),
        Scalar::I32(v) => writer.write_i32(v),
        Scalar::F32(v) => writer.write_f32(v),
    }
}

fn write_enum(writer: &mut Writer, tag: Tag, value: &EnumValue) -> Result<(), EncodeError> {
    let out_of_domain = || EncodeError::EnumOutOfDomain {
        tag,
        enumeration: value.table.name,
        value: value.raw,
    };
    if value.name().is_none() {
        return Err(out_of_domain());
    }
    let raw = Scalar::from_i64(value.table.width, value.raw).ok_or_else(out_of_domain)?;
    write_scalar(writer, raw);
    Ok(())
}

fn write_field(writer: &mut Writer, tag: Tag, value: &FieldValue) -> Result<(), EncodeError> {
    match value {
        FieldValue::Scalar(s) => write_scalar(writer, *s),
        FieldValue::Bytes(bytes) => writer.write_bytes(bytes),
        FieldValue::FormId(id) => writer.write_form_id(*id),
        FieldValue::Enum(e) => write_enum(writer, tag, e)?,
    }
    Ok(())
}
