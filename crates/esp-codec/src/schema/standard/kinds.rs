//! Built-in record kinds.

use std::sync::Arc;

use crate::codec::payload::Decoder;
use crate::error::SchemaError;
use crate::model::{FieldKind, ScalarKind, Tag};
use crate::schema::group::SharedGroup;
use crate::schema::kind::{RecordKind, RecordKindBuilder};
use crate::schema::standard::layouts::*;

/// Shared groups attached by the built-in kinds.
#[derive(Debug, Clone)]
pub struct StandardGroups {
    pub model: Arc<SharedGroup>,
    pub destruction: Arc<SharedGroup>,
    pub item: Arc<SharedGroup>,
}

fn tag(bytes: &[u8; 4]) -> Tag {
    Tag::new(bytes)
}

/// `EDID` and `OBND`, which every object kind starts with.
fn object(kind: &[u8; 4]) -> RecordKindBuilder {
    RecordKind::builder(tag(kind))
        .own(tag(b"EDID"), Decoder::Text)
        .own(tag(b"OBND"), Decoder::Layout(&OBJECT_BOUNDS))
}

/// Armor addon.
pub fn arma(groups: &StandardGroups) -> Result<RecordKind, SchemaError> {
    object(b"ARMA")
        .own(tag(b"FULL"), Decoder::Text)
        .own(tag(b"BMDT"), Decoder::Layout(&BIPED_DATA))
        .own(tag(b"ICON"), Decoder::Text)
        .own(tag(b"MICO"), Decoder::Text)
        .own(tag(b"ICO2"), Decoder::Text)
        .own(tag(b"MIC2"), Decoder::Text)
        .own(tag(b"ETYP"), Decoder::Scalar(ScalarKind::I32))
        .own(tag(b"DATA"), Decoder::Layout(&ARMOR_ADDON_DATA))
        .own(tag(b"DNAM"), Decoder::Compat(&ARMOR_RATING_COMPAT))
        .group(Arc::clone(&groups.model))
        .build()
}

/// Container.
pub fn cont(groups: &StandardGroups) -> Result<RecordKind, SchemaError> {
    object(b"CONT")
        .own(tag(b"FULL"), Decoder::Text)
        .own(tag(b"SCRI"), Decoder::FormId)
        .own(tag(b"DATA"), Decoder::Layout(&CONTAINER_DATA))
        .own(tag(b"SNAM"), Decoder::FormId)
        .own(tag(b"QNAM"), Decoder::FormId)
        .own(tag(b"RNAM"), Decoder::FormId)
        .group(Arc::clone(&groups.model))
        .group(Arc::clone(&groups.item))
        .group(Arc::clone(&groups.destruction))
        .build()
}

/// Creature.
pub fn crea(groups: &StandardGroups) -> Result<RecordKind, SchemaError> {
    object(b"CREA")
        .own(tag(b"ACBS"), Decoder::Layout(&ACTOR_CONFIG))
        .own(tag(b"AIDT"), Decoder::Layout(&AI_DATA))
        .own(tag(b"FULL"), Decoder::Text)
        .own(tag(b"SPLO"), Decoder::FormId)
        .own(tag(b"EITM"), Decoder::FormId)
        .own(tag(b"EAMT"), Decoder::Scalar(ScalarKind::U16))
        .own(tag(b"NIFZ"), Decoder::StringList)
        .own(tag(b"NIFT"), Decoder::Array(FieldKind::Scalar(ScalarKind::U8)))
        .own(tag(b"SNAM"), Decoder::Layout(&FACTION))
        .own(tag(b"INAM"), Decoder::FormId)
        .own(tag(b"VTCK"), Decoder::FormId)
        .own(tag(b"TPLT"), Decoder::FormId)
        .own(tag(b"SCRI"), Decoder::FormId)
        .own(tag(b"PKID"), Decoder::FormId)
        .own(tag(b"KFFZ"), Decoder::StringList)
        .own(tag(b"DATA"), Decoder::Layout(&CREATURE_DATA))
        .own(tag(b"RNAM"), Decoder::Scalar(ScalarKind::U8))
        .own(tag(b"ZNAM"), Decoder::FormId)
        .own(tag(b"PNAM"), Decoder::FormId)
        .own(tag(b"TNAM"), Decoder::Scalar(ScalarKind::F32))
        .own(tag(b"BNAM"), Decoder::Scalar(ScalarKind::F32))
        .own(tag(b"WNAM"), Decoder::Scalar(ScalarKind::F32))
        .own(tag(b"NAM4"), Decoder::Scalar(ScalarKind::U32))
        .own(tag(b"NAM5"), Decoder::Scalar(ScalarKind::U32))
        .own(tag(b"CSCR"), Decoder::FormId)
        .own(tag(b"CSDT"), Decoder::Enum(&SOUND_TYPE))
        .own(tag(b"CSDI"), Decoder::FormId)
        .own(tag(b"CSDC"), Decoder::Scalar(ScalarKind::U8))
        .own(tag(b"CNAM"), Decoder::FormId)
        .own(tag(b"LNAM"), Decoder::FormId)
        .group(Arc::clone(&groups.model))
        .group(Arc::clone(&groups.destruction))
        .group(Arc::clone(&groups.item))
        .build()
}

/// Key.
pub fn keym(groups: &StandardGroups) -> Result<RecordKind, SchemaError> {
    object(b"KEYM")
        .own(tag(b"FULL"), Decoder::Text)
        .own(tag(b"ICON"), Decoder::Text)
        .own(tag(b"MICO"), Decoder::Text)
        .own(tag(b"SCRI"), Decoder::FormId)
        .own(tag(b"YNAM"), Decoder::FormId)
        .own(tag(b"ZNAM"), Decoder::FormId)
        .own(tag(b"DATA"), Decoder::Layout(&KEY_DATA))
        .group(Arc::clone(&groups.model))
        .group(Arc::clone(&groups.destruction))
        .build()
}
