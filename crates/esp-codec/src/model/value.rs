//! Decoded subrecord values.
//!
//! Values are fully owned and self-describing: a [`Value`] carries the
//! layout or enum table it was decoded with, so it can be re-encoded without
//! consulting a dispatch table.

use std::fmt;

use crate::model::{EnumTable, FieldKind, FormId, Layout, ScalarKind};

/// A single fixed-width number.
///
/// `F32` compares by bit pattern, so `-0.0 != 0.0` and NaN payloads compare
/// equal to themselves. Equality therefore means "encodes to the same bytes".
#[derive(Debug, Clone, Copy)]
pub enum Scalar {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    F32(f32),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::U8(a), Scalar::U8(b)) => a == b,
            (Scalar::I8(a), Scalar::I8(b)) => a == b,
            (Scalar::U16(a), Scalar::U16(b)) => a == b,
            (Scalar::I16(a), Scalar::I16(b)) => a == b,
            (Scalar::U32(a), Scalar::U32(b)) => a == b,
            (Scalar::I32(a), Scalar::I32(b)) => a == b,
            (Scalar::F32(a), Scalar::F32(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Scalar {
    /// Returns the binary type of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::F32(_) => ScalarKind::F32,
        }
    }

    /// Returns the zero value of a kind.
    pub fn zero(kind: ScalarKind) -> Scalar {
        match kind {
            ScalarKind::U8 => Scalar::U8(0),
            ScalarKind::I8 => Scalar::I8(0),
            ScalarKind::U16 => Scalar::U16(0),
            ScalarKind::I16 => Scalar::I16(0),
            ScalarKind::U32 => Scalar::U32(0),
            ScalarKind::I32 => Scalar::I32(0),
            ScalarKind::F32 => Scalar::F32(0.0),
        }
    }

    /// Builds an integer scalar of the given kind, if `value` fits.
    pub fn from_i64(kind: ScalarKind, value: i64) -> Option<Scalar> {
        Some(match kind {
            ScalarKind::U8 => Scalar::U8(u8::try_from(value).ok()?),
            ScalarKind::I8 => Scalar::I8(i8::try_from(value).ok()?),
            ScalarKind::U16 => Scalar::U16(u16::try_from(value).ok()?),
            ScalarKind::I16 => Scalar::I16(i16::try_from(value).ok()?),
            ScalarKind::U32 => Scalar::U32(u32::try_from(value).ok()?),
            ScalarKind::I32 => Scalar::I32(i32::try_from(value).ok()?),
            ScalarKind::F32 => return None,
        })
    }

    /// Returns the integer value, or `None` for floats.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Scalar::U8(v) => Some(v as i64),
            Scalar::I8(v) => Some(v as i64),
            Scalar::U16(v) => Some(v as i64),
            Scalar::I16(v) => Some(v as i64),
            Scalar::U32(v) => Some(v as i64),
            Scalar::I32(v) => Some(v as i64),
            Scalar::F32(_) => None,
        }
    }

    /// Returns the float value, or `None` for integers.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Scalar::F32(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
        }
    }
}

/// A member of a closed enumeration.
///
/// Only values present in the table can be decoded. A value built by hand
/// with an unknown raw integer is rejected when encoded.
#[derive(Clone, Copy, PartialEq)]
pub struct EnumValue {
    pub table: &'static EnumTable,
    pub raw: i64,
}

impl EnumValue {
    /// Looks a member up by name.
    pub fn named(table: &'static EnumTable, name: &str) -> Option<Self> {
        table.value_of(name).map(|raw| Self { table, raw })
    }

    /// Looks a member up by raw value.
    pub fn from_raw(table: &'static EnumTable, raw: i64) -> Option<Self> {
        table.name_of(raw).map(|_| Self { table, raw })
    }

    /// Returns the member's name.
    pub fn name(&self) -> Option<&'static str> {
        self.table.name_of(self.raw)
    }
}

impl Eq for EnumValue {}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}::{}({})", self.table.name, name, self.raw),
            None => write!(f, "{}::?({})", self.table.name, self.raw),
        }
    }
}

/// The value of one packed field or array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(Scalar),
    Bytes(Vec<u8>),
    FormId(FormId),
    Enum(EnumValue),
}

impl FieldValue {
    /// Returns the zero value for a field kind (zero-filled bytes, null form
    /// reference, raw 0 for enums).
    pub fn zero(kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::Scalar(kind) => FieldValue::Scalar(Scalar::zero(kind)),
            FieldKind::Bytes(n) => FieldValue::Bytes(vec![0u8; n]),
            FieldKind::FormId => FieldValue::FormId(FormId::default()),
            FieldKind::Enum(table) => FieldValue::Enum(EnumValue { table, raw: 0 }),
        }
    }

    /// Returns a short name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Scalar(s) => s.kind().name(),
            FieldValue::Bytes(_) => "bytes",
            FieldValue::FormId(_) => "form id",
            FieldValue::Enum(e) => e.table.name,
        }
    }

    /// Returns true if this value has the type (and width) of `kind`.
    pub fn matches(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (FieldValue::Scalar(s), FieldKind::Scalar(k)) => s.kind() == *k,
            (FieldValue::Bytes(b), FieldKind::Bytes(n)) => b.len() == *n,
            (FieldValue::FormId(_), FieldKind::FormId) => true,
            (FieldValue::Enum(e), FieldKind::Enum(t)) => e.table == *t,
            _ => false,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            FieldValue::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_form_id(&self) -> Option<FormId> {
        match self {
            FieldValue::FormId(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            FieldValue::Enum(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<FormId> for FieldValue {
    fn from(id: FormId) -> Self {
        FieldValue::FormId(id)
    }
}

impl From<EnumValue> for FieldValue {
    fn from(e: EnumValue) -> Self {
        FieldValue::Enum(e)
    }
}

/// Values of a fixed packed layout, in layout order.
#[derive(Clone, PartialEq)]
pub struct Fields {
    layout: &'static Layout,
    values: Vec<FieldValue>,
}

impl Eq for Fields {}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.layout.name);
        for (name, value) in self.iter() {
            out.field(name, value);
        }
        out.finish()
    }
}

impl Fields {
    /// Pairs a layout with its values. The encoder checks that they agree.
    pub fn new(layout: &'static Layout, values: Vec<FieldValue>) -> Self {
        Self { layout, values }
    }

    /// Returns the all-zero value of a layout.
    pub fn zeroed(layout: &'static Layout) -> Self {
        let values = layout.fields.iter().map(|f| FieldValue::zero(f.kind)).collect();
        Self { layout, values }
    }

    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Returns the named field's value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.layout.field_index(name).and_then(|i| self.values.get(i))
    }

    /// Replaces the named field's value. Returns false if there is no such field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.layout.field_index(name) {
            Some(i) if i < self.values.len() => {
                self.values[i] = value;
                true
            }
            _ => false,
        }
    }

    /// Iterates over `(field name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.layout.fields.iter().map(|f| f.name).zip(self.values.iter())
    }

    /// Returns an integer field.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_scalar()?.as_i64()
    }

    /// Returns a float field.
    pub fn float(&self, name: &str) -> Option<f32> {
        self.get(name)?.as_scalar()?.as_f32()
    }

    /// Returns the member name of an enum field.
    pub fn enum_name(&self, name: &str) -> Option<&'static str> {
        self.get(name)?.as_enum()?.name()
    }
}

/// The decoded payload of one subrecord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Fixed packed layout (also the result of a compatibility variant).
    Fields(Fields),
    Scalar(Scalar),
    /// Text without its zero terminator. Usually ASCII or Windows-1252.
    Text(Vec<u8>),
    Array(Vec<FieldValue>),
    /// Zero-delimited list; a trailing delimiter shows up as a trailing
    /// empty element.
    StringList(Vec<Vec<u8>>),
    Enum(EnumValue),
    FormId(FormId),
    Raw(Vec<u8>),
}

impl Value {
    /// Returns a short name for the value's shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Fields(_) => "layout",
            Value::Scalar(_) => "scalar",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::StringList(_) => "string list",
            Value::Enum(_) => "enum",
            Value::FormId(_) => "form id",
            Value::Raw(_) => "raw",
        }
    }

    /// Builds a text value.
    pub fn text(s: &str) -> Value {
        Value::Text(s.as_bytes().to_vec())
    }

    /// Returns text as `&str` if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Value::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_form_id(&self) -> Option<FormId> {
        match self {
            Value::FormId(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[Vec<u8>]> {
        match self {
            Value::StringList(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field;

    const SOUND: EnumTable = EnumTable::new("SoundType", ScalarKind::U32, &[(0, "LeftFoot"), (4, "Idle")]);

    const WEIGHTED: Layout = Layout::new(
        "Weighted",
        &[
            field("value", FieldKind::Scalar(ScalarKind::U32)),
            field("weight", FieldKind::Scalar(ScalarKind::F32)),
        ],
    );

    #[test]
    fn test_scalar_float_equality_is_bitwise() {
        assert_eq!(Scalar::F32(f32::NAN), Scalar::F32(f32::NAN));
        assert_ne!(Scalar::F32(0.0), Scalar::F32(-0.0));
        assert_ne!(Scalar::U8(1), Scalar::I8(1));
    }

    #[test]
    fn test_scalar_from_i64() {
        assert_eq!(Scalar::from_i64(ScalarKind::U8, 255), Some(Scalar::U8(255)));
        assert_eq!(Scalar::from_i64(ScalarKind::U8, 256), None);
        assert_eq!(Scalar::from_i64(ScalarKind::I8, -1), Some(Scalar::I8(-1)));
        assert_eq!(Scalar::from_i64(ScalarKind::F32, 0), None);
    }

    #[test]
    fn test_enum_value_lookup() {
        let idle = EnumValue::named(&SOUND, "Idle").unwrap();
        assert_eq!(idle.raw, 4);
        assert_eq!(idle.name(), Some("Idle"));
        assert_eq!(EnumValue::from_raw(&SOUND, 3), None);
        assert_eq!(format!("{:?}", idle), "SoundType::Idle(4)");
    }

    #[test]
    fn test_fields_accessors() {
        let mut fields = Fields::zeroed(&WEIGHTED);
        assert_eq!(fields.int("value"), Some(0));
        assert!(fields.set("weight", Scalar::F32(5.5).into()));
        assert!(!fields.set("missing", Scalar::U8(0).into()));
        assert_eq!(fields.float("weight"), Some(5.5));

        let names: Vec<_> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["value", "weight"]);
    }

    #[test]
    fn test_field_value_matches_kind() {
        assert!(FieldValue::Bytes(vec![0; 3]).matches(&FieldKind::Bytes(3)));
        assert!(!FieldValue::Bytes(vec![0; 2]).matches(&FieldKind::Bytes(3)));
        assert!(FieldValue::zero(FieldKind::Enum(&SOUND)).matches(&FieldKind::Enum(&SOUND)));
    }

    #[test]
    fn test_text_helpers() {
        let value = Value::text("Iron");
        assert_eq!(value.as_text(), Some("Iron"));
        assert_eq!(Value::Text(vec![0xff]).as_text(), None);
        assert_eq!(value.shape_name(), "text");
    }
}
