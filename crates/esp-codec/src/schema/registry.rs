//! Registry of record kinds, keyed by record tag.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{DecodeError, SchemaError};
use crate::model::{Record, Tag};
use crate::schema::kind::RecordKind;
use crate::schema::standard;

/// Maps record-kind tags to their dispatch tables.
///
/// This is the entry point for a container layer: it knows each record's
/// tag and payload, and asks the registry to decode the payload.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    kinds: FxHashMap<Tag, Arc<RecordKind>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry of built-in record kinds, built on first use.
    pub fn standard() -> Result<&'static Registry, SchemaError> {
        let registry: &'static Result<Registry, SchemaError> = &standard::REGISTRY;
        registry.as_ref().map_err(Clone::clone)
    }

    /// Registers a record kind. Each record tag can be registered once.
    pub fn register(&mut self, kind: RecordKind) -> Result<Arc<RecordKind>, SchemaError> {
        let tag = kind.tag();
        if self.kinds.contains_key(&tag) {
            return Err(SchemaError::DuplicateRecordKind { tag });
        }
        let kind = Arc::new(kind);
        self.kinds.insert(tag, Arc::clone(&kind));
        Ok(kind)
    }

    pub fn get(&self, tag: Tag) -> Option<&Arc<RecordKind>> {
        self.kinds.get(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.kinds.contains_key(&tag)
    }

    /// Registered record tags, sorted.
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.kinds.keys().copied().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Decodes the payload of a record of kind `record`.
    pub fn decode(&self, record: Tag, payload: &[u8]) -> Result<Record, DecodeError> {
        let kind = self.get(record).ok_or_else(|| DecodeError::UnsupportedSubrecord {
            scope: "registry".to_string(),
            tag: record,
        })?;
        kind.decode(payload)
    }
}
