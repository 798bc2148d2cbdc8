//! Core runtime for widedb: a data-access layer over a wide-column store
//! with denormalized per-dimension views, cursor paging, and conditional
//! inserts. Domain vocabulary is exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            cursor::{PageCursor, TextCursor, TimeCursor},
            direction::Direction,
            query::Predicates,
            response::{Page, SaveOutcome},
        },
        entity::{
            ComponentDescriptor, ComponentScope, ComponentType, EntityId, EntityType, Event,
            EventKey,
        },
        traits::EntityKind,
        types::Ulid,
        value::Value,
    };
}
