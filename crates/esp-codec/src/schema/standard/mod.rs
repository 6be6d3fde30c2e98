//! Built-in schema: common subrecords, shared groups and record kinds.
//!
//! Everything here is built once, on first use.

pub mod groups;
pub mod kinds;
pub mod layouts;

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::error::SchemaError;
use crate::schema::group::SharedGroup;
use crate::schema::registry::Registry;

pub use kinds::StandardGroups;

lazy_static! {
    /// `MODL` and friends.
    pub static ref MODEL: Arc<SharedGroup> = Arc::new(groups::model());
    /// `DEST`, `DSTD`, `DMDL`, `DMDT`, `DSTF`.
    pub static ref DESTRUCTION: Arc<SharedGroup> = Arc::new(groups::destruction());
    /// `CNTO`, `COED`.
    pub static ref ITEM: Arc<SharedGroup> = Arc::new(groups::item());

    pub(crate) static ref REGISTRY: Result<Registry, SchemaError> = build_registry();
}

/// Returns handles to the built-in shared groups.
pub fn standard_groups() -> StandardGroups {
    StandardGroups {
        model: Arc::clone(&MODEL),
        destruction: Arc::clone(&DESTRUCTION),
        item: Arc::clone(&ITEM),
    }
}

fn build_registry() -> Result<Registry, SchemaError> {
    let groups = standard_groups();
    let mut registry = Registry::new();
    registry.register(kinds::arma(&groups)?)?;
    registry.register(kinds::cont(&groups)?)?;
    registry.register(kinds::crea(&groups)?)?;
    registry.register(kinds::keym(&groups)?)?;
    Ok(registry)
}
