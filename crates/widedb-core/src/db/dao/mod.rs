//! Module: dao
//! Responsibility: per-entity access objects composing the executors.
//! Does not own: paging, view choice, or write semantics; those live in
//! `executor`, `query`, and `cursor`.

mod descriptor;
mod event;


pub use descriptor::ComponentDescriptorDao;
pub use event::{EventDao, entity_predicates};
