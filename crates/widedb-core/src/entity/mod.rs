//! Module: entity
//! Responsibility: the two record kinds stored by the access layer and
//! their mapping to columns.
//! Does not own: statement execution or paging.

mod descriptor;
mod event;


pub use descriptor::{ComponentDescriptor, ComponentScope, ComponentType};
pub use event::{EntityId, EntityType, Event, EventKey};

use crate::error::InternalError;

// Upper-case enum labels as stored in text columns.
pub(crate) fn parse_label<T: Copy>(
    entity_path: &str,
    column: &str,
    label: &str,
    all: &[(T, &str)],
) -> Result<T, InternalError> {
    all.iter()
        .find(|(_, l)| *l == label)
        .map(|(v, _)| *v)
        .ok_or_else(|| {
            InternalError::row_corruption(entity_path, column, format!("unknown label '{label}'"))
        })
}
