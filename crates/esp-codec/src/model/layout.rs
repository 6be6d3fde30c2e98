//! Declarative payload shapes: packed field layouts, enum tables and
//! compatibility variants.
//!
//! Layouts are plain `'static` data so schema tables can be written as
//! constants and shared by every record kind that needs them.

use crate::error::SchemaError;
use crate::limits::FORM_ID_LEN;
use crate::model::Tag;

/// Binary type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
}

impl ScalarKind {
    /// Returns the width in bytes.
    pub const fn width(self) -> usize {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::U8 => "u8",
            ScalarKind::I8 => "i8",
            ScalarKind::U16 => "u16",
            ScalarKind::I16 => "i16",
            ScalarKind::U32 => "u32",
            ScalarKind::I32 => "i32",
            ScalarKind::F32 => "f32",
        }
    }

    /// Returns true if `value` is representable by this integer kind.
    /// Always false for `F32`.
    pub fn fits(self, value: i64) -> bool {
        match self {
            ScalarKind::U8 => u8::try_from(value).is_ok(),
            ScalarKind::I8 => i8::try_from(value).is_ok(),
            ScalarKind::U16 => u16::try_from(value).is_ok(),
            ScalarKind::I16 => i16::try_from(value).is_ok(),
            ScalarKind::U32 => u32::try_from(value).is_ok(),
            ScalarKind::I32 => i32::try_from(value).is_ok(),
            ScalarKind::F32 => false,
        }
    }
}

/// Binary type of one field in a packed layout or one array element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Uninterpreted span of a fixed number of bytes (padding, unknowns).
    Bytes(usize),
    /// Opaque 4-byte reference to another record.
    FormId,
    /// Integer mapped through a closed name table.
    Enum(&'static EnumTable),
}

impl FieldKind {
    /// Returns the width in bytes.
    pub fn width(&self) -> usize {
        match self {
            FieldKind::Scalar(kind) => kind.width(),
            FieldKind::Bytes(n) => *n,
            FieldKind::FormId => FORM_ID_LEN,
            FieldKind::Enum(table) => table.width.width(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Scalar(kind) => kind.name(),
            FieldKind::Bytes(_) => "bytes",
            FieldKind::FormId => "form id",
            FieldKind::Enum(table) => table.name,
        }
    }
}

/// One named field of a packed layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Shorthand for building [`FieldSpec`] constants.
pub const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// A fixed packed layout: ordered fields with no padding between them.
///
/// A layout with no fields describes a zero-size marker subrecord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Layout {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Returns the total width in bytes.
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.kind.width()).sum()
    }

    /// Returns the position of the named field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns true if the layout has no fields.
    pub fn is_marker(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A closed table of named integer values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumTable {
    pub name: &'static str,
    /// Wire width and signedness of the raw value.
    pub width: ScalarKind,
    pub variants: &'static [(i64, &'static str)],
}

impl EnumTable {
    pub const fn new(
        name: &'static str,
        width: ScalarKind,
        variants: &'static [(i64, &'static str)],
    ) -> Self {
        Self {
            name,
            width,
            variants,
        }
    }

    /// Returns the name bound to a raw value.
    pub fn name_of(&self, raw: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|(value, _)| *value == raw)
            .map(|(_, name)| *name)
    }

    /// Returns the raw value bound to a name.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(value, _)| *value)
    }

    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        for (value, _) in self.variants {
            if !self.width.fits(*value) {
                return Err(SchemaError::EnumValueOutOfRange {
                    enumeration: self.name,
                    value: *value,
                    width: self.width.width(),
                });
            }
        }
        Ok(())
    }
}

/// Alternate historical layouts accepted for one tag.
///
/// The envelope size selects the shape: the canonical layout's width decodes
/// as-is, a legacy layout's width decodes that layout and remaps it into the
/// canonical one. Fields are carried over by name; canonical fields the
/// legacy shape lacks are zero-filled. Encoding always emits the canonical
/// layout, so legacy inputs do not re-encode byte-identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compat {
    pub canonical: &'static Layout,
    pub legacy: &'static [&'static Layout],
}

impl Compat {
    pub const fn new(canonical: &'static Layout, legacy: &'static [&'static Layout]) -> Self {
        Self { canonical, legacy }
    }

    /// Returns the legacy layout whose width equals `size`.
    pub fn legacy_for(&self, size: usize) -> Option<&'static Layout> {
        self.legacy.iter().copied().find(|l| l.width() == size)
    }

    pub(crate) fn validate(&self, tag: Tag) -> Result<(), SchemaError> {
        let mut widths = vec![self.canonical.width()];
        for legacy in self.legacy {
            let width = legacy.width();
            if widths.contains(&width) {
                return Err(SchemaError::LegacyWidthCollision { tag, width });
            }
            widths.push(width);

            for spec in legacy.fields {
                let matched = self
                    .canonical
                    .fields
                    .iter()
                    .any(|c| c.name == spec.name && c.kind == spec.kind);
                if !matched {
                    return Err(SchemaError::LegacyFieldMismatch {
                        tag,
                        field: spec.name,
                    });
                }
            }

            // Canonical fields the legacy shape lacks are zero-filled.
            for spec in self.canonical.fields {
                let FieldKind::Enum(table) = spec.kind else {
                    continue;
                };
                let carried = legacy.fields.iter().any(|l| l.name == spec.name);
                if !carried && table.name_of(0).is_none() {
                    return Err(SchemaError::LegacyEnumWithoutZero {
                        tag,
                        field: spec.name,
                        enumeration: table.name,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMOR: Layout = Layout::new(
        "ArmorData",
        &[
            field("ar", FieldKind::Scalar(ScalarKind::I16)),
            field("flags", FieldKind::Scalar(ScalarKind::U16)),
            field("unknown", FieldKind::Bytes(8)),
        ],
    );

    const ARMOR_OLD: Layout = Layout::new(
        "ArmorDataOld",
        &[
            field("ar", FieldKind::Scalar(ScalarKind::I16)),
            field("flags", FieldKind::Scalar(ScalarKind::U16)),
        ],
    );

    const BAD_OLD: Layout = Layout::new(
        "BadOld",
        &[field("ar", FieldKind::Scalar(ScalarKind::U32))],
    );

    const KIND: EnumTable = EnumTable::new("Kind", ScalarKind::U8, &[(1, "Light"), (2, "Heavy")]);
    const KIND_WITH_ZERO: EnumTable =
        EnumTable::new("Kind", ScalarKind::U8, &[(0, "None"), (1, "Light")]);

    const RATED: Layout = Layout::new(
        "Rated",
        &[
            field("ar", FieldKind::Scalar(ScalarKind::I16)),
            field("kind", FieldKind::Enum(&KIND)),
        ],
    );
    const RATED_WITH_ZERO: Layout = Layout::new(
        "Rated",
        &[
            field("ar", FieldKind::Scalar(ScalarKind::I16)),
            field("kind", FieldKind::Enum(&KIND_WITH_ZERO)),
        ],
    );
    const RATED_OLD: Layout = Layout::new(
        "RatedOld",
        &[field("ar", FieldKind::Scalar(ScalarKind::I16))],
    );

    const SIGNED: EnumTable = EnumTable::new("Skill", ScalarKind::I8, &[(-1, "None"), (0, "Barter")]);
    const UNSIGNED_NEG: EnumTable = EnumTable::new("Broken", ScalarKind::U8, &[(-1, "None")]);

    #[test]
    fn test_layout_width() {
        assert_eq!(ARMOR.width(), 12);
        assert_eq!(ARMOR_OLD.width(), 4);
        assert_eq!(ARMOR.field_index("flags"), Some(1));
        assert!(Layout::new("Marker", &[]).is_marker());
    }

    #[test]
    fn test_enum_lookup() {
        assert_eq!(SIGNED.name_of(-1), Some("None"));
        assert_eq!(SIGNED.value_of("Barter"), Some(0));
        assert_eq!(SIGNED.name_of(5), None);
        assert!(SIGNED.validate().is_ok());
        assert!(matches!(
            UNSIGNED_NEG.validate(),
            Err(SchemaError::EnumValueOutOfRange { value: -1, .. })
        ));
    }

    #[test]
    fn test_compat_validation() {
        let tag = Tag::new(b"DNAM");
        let ok = Compat::new(&ARMOR, &[&ARMOR_OLD]);
        assert!(ok.validate(tag).is_ok());
        assert_eq!(ok.legacy_for(4), Some(&ARMOR_OLD));
        assert_eq!(ok.legacy_for(12), None);

        let mismatched = Compat::new(&ARMOR, &[&BAD_OLD]);
        assert!(matches!(
            mismatched.validate(tag),
            Err(SchemaError::LegacyFieldMismatch { field: "ar", .. })
        ));

        let collision = Compat::new(&ARMOR, &[&ARMOR]);
        assert!(matches!(
            collision.validate(tag),
            Err(SchemaError::LegacyWidthCollision { width: 12, .. })
        ));
    }

    #[test]
    fn test_compat_rejects_enum_without_zero_fill() {
        let tag = Tag::new(b"DNAM");
        let unfillable = Compat::new(&RATED, &[&RATED_OLD]);
        assert!(matches!(
            unfillable.validate(tag),
            Err(SchemaError::LegacyEnumWithoutZero { field: "kind", enumeration: "Kind", .. })
        ));

        let fillable = Compat::new(&RATED_WITH_ZERO, &[&RATED_OLD]);
        assert!(fillable.validate(tag).is_ok());
    }
}
