//! Record kinds and the subrecord dispatcher.
//!
//! A [`RecordKind`] knows which decoder handles every tag its records may
//! contain: its own table plus the members of its attached shared groups,
//! merged into one lookup map when the kind is built. Decoding a record
//! payload walks the envelopes in order and dispatches each one by tag.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::codec::envelope::{read_envelope, Envelope};
use crate::codec::payload::Decoder;
use crate::codec::primitives::Reader;
use crate::error::{DecodeError, SchemaError};
use crate::model::{Record, Subrecord, Tag};
use crate::schema::group::SharedGroup;

/// Where a tag's decoder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The record kind's own table.
    Own,
    /// An attached group, by attachment index.
    Group(usize),
}

/// A resolved tag binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub decoder: Decoder,
    pub source: Source,
}

/// A record kind: its tag, its own subrecord table and its attached groups.
///
/// Immutable once built, so one instance can decode any number of payloads
/// concurrently.
#[derive(Debug, Clone)]
pub struct RecordKind {
    tag: Tag,
    own: Vec<(Tag, Decoder)>,
    groups: Vec<Arc<SharedGroup>>,
    bindings: FxHashMap<Tag, Binding>,
}

impl RecordKind {
    /// Starts building a record kind.
    pub fn builder(tag: Tag) -> RecordKindBuilder {
        RecordKindBuilder::new(tag)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The kind's own `(tag, decoder)` table, in declaration order.
    pub fn own(&self) -> &[(Tag, Decoder)] {
        &self.own
    }

    /// Attached groups, in declaration order.
    pub fn groups(&self) -> &[Arc<SharedGroup>] {
        &self.groups
    }

    /// Returns the binding that decodes `tag`.
    pub fn binding(&self, tag: Tag) -> Option<&Binding> {
        self.bindings.get(&tag)
    }

    pub fn decoder(&self, tag: Tag) -> Option<Decoder> {
        self.bindings.get(&tag).map(|b| b.decoder)
    }

    /// Returns true if any tag resolves for this kind.
    pub fn supports(&self, tag: Tag) -> bool {
        self.bindings.contains_key(&tag)
    }

    /// Returns the attached group `tag` resolves through, if any.
    pub fn group_of(&self, tag: Tag) -> Option<&SharedGroup> {
        match self.bindings.get(&tag)?.source {
            Source::Own => None,
            Source::Group(i) => self.groups.get(i).map(|g| g.as_ref()),
        }
    }

    /// Number of distinct tags this kind can decode.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Decodes one envelope of this kind's records.
    pub fn decode_envelope(&self, envelope: Envelope<'_>) -> Result<Subrecord, DecodeError> {
        let binding = self.binding(envelope.tag).ok_or_else(|| DecodeError::UnsupportedSubrecord {
            scope: self.tag.to_string(),
            tag: envelope.tag,
        })?;
        let value = binding.decoder.decode(envelope.tag, envelope.payload)?;
        Ok(Subrecord::new(envelope.tag, value))
    }

    /// Lazily decodes the subrecords of one record payload.
    ///
    /// The iterator yields each subrecord in wire order, ends at the end of
    /// the payload, and stops for good after yielding the first error.
    pub fn subrecords<'k, 'a>(&'k self, payload: &'a [u8]) -> Subrecords<'k, 'a> {
        Subrecords {
            kind: self,
            reader: Reader::new(payload),
            state: State::Scanning,
        }
    }

    /// Decodes a whole record payload.
    pub fn decode(&self, payload: &[u8]) -> Result<Record, DecodeError> {
        let subrecords = self.subrecords(payload).collect::<Result<Vec<_>, _>>()?;
        Ok(Record {
            kind: self.tag,
            subrecords,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
    Failed,
}

/// Iterator over the subrecords of one record payload.
///
/// Created by [`RecordKind::subrecords`]. Owns its cursor; dropping it
/// abandons the scan.
#[derive(Debug)]
pub struct Subrecords<'k, 'a> {
    kind: &'k RecordKind,
    reader: Reader<'a>,
    state: State,
}

impl<'k, 'a> Subrecords<'k, 'a> {
    /// Byte offset of the next envelope.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Returns true once the iterator has stopped on an error.
    pub fn failed(&self) -> bool {
        self.state == State::Failed
    }

    fn step(&mut self) -> Result<Option<Subrecord>, DecodeError> {
        let offset = self.reader.position();
        let Some(envelope) = read_envelope(&mut self.reader)? else {
            return Ok(None);
        };
        trace!(
            record = %self.kind.tag,
            tag = %envelope.tag,
            size = envelope.size(),
            offset,
            "decoding subrecord"
        );
        self.kind.decode_envelope(envelope).map(Some)
    }
}

impl Iterator for Subrecords<'_, '_> {
    type Item = Result<Subrecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Scanning {
            return None;
        }
        match self.step() {
            Ok(Some(subrecord)) => Some(Ok(subrecord)),
            Ok(None) => {
                self.state = State::Done;
                None
            }
            Err(e) => {
                self.state = State::Failed;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Subrecords<'_, '_> {}

/// Builder for a [`RecordKind`].
#[derive(Debug, Clone)]
pub struct RecordKindBuilder {
    tag: Tag,
    own: Vec<(Tag, Decoder)>,
    groups: Vec<Arc<SharedGroup>>,
    allow_shadowing: bool,
}

impl RecordKindBuilder {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            own: Vec::new(),
            groups: Vec::new(),
            allow_shadowing: false,
        }
    }

    /// Binds a tag in the kind's own table.
    pub fn own(mut self, tag: Tag, decoder: Decoder) -> Self {
        self.own.push((tag, decoder));
        self
    }

    /// Attaches a shared group.
    pub fn group(mut self, group: Arc<SharedGroup>) -> Self {
        self.groups.push(group);
        self
    }

    /// Lets tags bound more than once resolve by priority instead of failing
    /// the build: the own table first, then groups in attachment order.
    pub fn allow_shadowing(mut self) -> Self {
        self.allow_shadowing = true;
        self
    }

    /// Validates every decoder and merges the bindings.
    pub fn build(self) -> Result<RecordKind, SchemaError> {
        let mut bindings: FxHashMap<Tag, Binding> = FxHashMap::default();
        let mut shadowed = Vec::new();

        for (tag, decoder) in &self.own {
            decoder.validate(*tag)?;
            if bindings.contains_key(tag) {
                return Err(self.duplicate(*tag, Source::Own, Source::Own));
            }
            bindings.insert(
                *tag,
                Binding {
                    decoder: *decoder,
                    source: Source::Own,
                },
            );
        }

        for (index, group) in self.groups.iter().enumerate() {
            group.validate()?;
            for (tag, decoder) in group.members() {
                if let Some(existing) = bindings.get(tag) {
                    if !self.allow_shadowing {
                        return Err(self.duplicate(*tag, existing.source, Source::Group(index)));
                    }
                    shadowed.push(*tag);
                    continue;
                }
                bindings.insert(
                    *tag,
                    Binding {
                        decoder: *decoder,
                        source: Source::Group(index),
                    },
                );
            }
        }

        debug!(
            record = %self.tag,
            bindings = bindings.len(),
            groups = self.groups.len(),
            shadowed = ?shadowed,
            "registered record kind"
        );

        Ok(RecordKind {
            tag: self.tag,
            own: self.own,
            groups: self.groups,
            bindings,
        })
    }

    fn describe(&self, source: Source) -> String {
        match source {
            Source::Own => "own table".to_string(),
            Source::Group(i) => match self.groups.get(i) {
                Some(group) => format!("group {}", group.name()),
                None => format!("group #{}", i),
            },
        }
    }

    fn duplicate(&self, tag: Tag, first: Source, second: Source) -> SchemaError {
        SchemaError::DuplicateTag {
            record: self.tag,
            tag,
            first: self.describe(first),
            second: self.describe(second),
        }
    }
}
