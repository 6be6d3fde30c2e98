//! Record schemas: shared groups, record kinds and their registry.

pub mod group;
pub mod kind;
pub mod registry;
pub mod standard;

pub use group::SharedGroup;
pub use kind::{Binding, RecordKind, RecordKindBuilder, Source, Subrecords};
pub use registry::Registry;
