//! Built-in shared groups.

use crate::codec::payload::Decoder;
use crate::model::{ScalarKind, Tag};
use crate::schema::group::SharedGroup;
use crate::schema::standard::layouts::*;

/// Model filename plus its bound radius, texture hashes and alternate textures.
pub fn model() -> SharedGroup {
    SharedGroup::new("Model")
        .member(Tag::new(b"MODL"), Decoder::Text)
        .member(Tag::new(b"MODB"), Decoder::Scalar(ScalarKind::F32))
        .member(Tag::new(b"MODT"), Decoder::Raw)
        .member(Tag::new(b"MODS"), Decoder::Raw)
        .member(Tag::new(b"MODD"), Decoder::Scalar(ScalarKind::U8))
}

/// Destruction header, stages and stage models.
pub fn destruction() -> SharedGroup {
    SharedGroup::new("Destruction")
        .member(Tag::new(b"DEST"), Decoder::Layout(&DESTRUCTION_HEADER))
        .member(Tag::new(b"DSTD"), Decoder::Layout(&DESTRUCTION_STAGE))
        .member(Tag::new(b"DMDL"), Decoder::Text)
        .member(Tag::new(b"DMDT"), Decoder::Raw)
        .member(Tag::new(b"DSTF"), Decoder::Layout(&STAGE_END))
}

/// Inventory entries.
pub fn item() -> SharedGroup {
    SharedGroup::new("Item")
        .member(Tag::new(b"CNTO"), Decoder::Layout(&CONTAINER_ITEM))
        .member(Tag::new(b"COED"), Decoder::Layout(&EXTRA_DATA))
}

/// Embedded script blocks.
pub fn script() -> SharedGroup {
    SharedGroup::new("Script")
        .member(Tag::new(b"SCHR"), Decoder::Layout(&SCRIPT_HEADER))
        .member(Tag::new(b"SCDA"), Decoder::Raw)
        .member(Tag::new(b"SCTX"), Decoder::Raw)
        .member(Tag::new(b"SLSD"), Decoder::Layout(&LOCAL_VARIABLE))
        .member(Tag::new(b"SCVR"), Decoder::Text)
        .member(Tag::new(b"SCRO"), Decoder::FormId)
}
