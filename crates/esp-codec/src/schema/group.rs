//! Shared subrecord groups.
//!
//! A group is an ordered set of tags, each bound to one decoder, that several
//! record kinds carry in the same way (model paths, destruction data, script
//! blocks). Record kinds attach groups by `Arc`; a group never knows who
//! uses it and holds no state.

use tracing::trace;

use crate::codec::payload::Decoder;
use crate::error::{DecodeError, SchemaError};
use crate::model::{Subrecord, Tag};

/// An immutable, ordered set of `(tag, decoder)` members.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedGroup {
    name: &'static str,
    members: Vec<(Tag, Decoder)>,
}

impl SharedGroup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Adds a member. Adding a tag twice replaces its decoder but keeps its
    /// original position.
    pub fn member(mut self, tag: Tag, decoder: Decoder) -> Self {
        match self.members.iter_mut().find(|(t, _)| *t == tag) {
            Some(slot) => slot.1 = decoder,
            None => self.members.push((tag, decoder)),
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if `tag` is one of this group's members.
    pub fn belongs_to(&self, tag: Tag) -> bool {
        self.members.iter().any(|(t, _)| *t == tag)
    }

    /// Returns the decoder bound to `tag`.
    pub fn decoder(&self, tag: Tag) -> Option<Decoder> {
        self.members.iter().find(|(t, _)| *t == tag).map(|(_, d)| *d)
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[(Tag, Decoder)] {
        &self.members
    }

    /// Decodes one member's payload.
    pub fn decode_member(&self, tag: Tag, payload: &[u8]) -> Result<Subrecord, DecodeError> {
        let decoder = self.decoder(tag).ok_or_else(|| DecodeError::UnsupportedSubrecord {
            scope: format!("group {}", self.name),
            tag,
        })?;
        trace!(group = self.name, %tag, size = payload.len(), "decoding group member");
        let value = decoder.decode(tag, payload)?;
        Ok(Subrecord::new(tag, value))
    }

    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        self.members.iter().try_for_each(|(tag, decoder)| decoder.validate(*tag))
    }
}
