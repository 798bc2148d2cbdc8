//! ## Crate layout
//! - `core`: values, cursors, statements, executors, the storage port, and
//!   the component-descriptor and event access objects.
//! - `config`: TOML loading for runtime knobs.
//! - `error`: stable public error taxonomy.
//!
//! The `prelude` module carries what a service needs to open a `Db` over a
//! store session and page through records.

pub use widedb_core as core;

pub mod config;
pub mod error;

use std::sync::Arc;

pub use config::{Config, ConfigError};
pub use error::Error;

use widedb_core::db::{Db, store::Session};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open a `Db` handle over `session` with the loaded configuration.
#[must_use]
pub fn open(session: Arc<dyn Session>, config: &Config) -> Db {
    Db::new(session).with_config(config.db.clone())
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        db::{
            Db,
            dao::{ComponentDescriptorDao, EventDao, entity_predicates},
            executor::SaveMode,
            store::{MemoryStore, Session},
        },
        prelude::*,
    };
    pub use crate::{Config, Error};
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use widedb_core::db::schema::{COMPONENT_DESCRIPTOR_SCHEMA, EVENT_SCHEMA};

    #[test]
    fn opened_db_enforces_configured_page_size() {
        let config = Config::from_toml_str("[db]\nmax_page_size = 3\n").expect("config");
        let store = Arc::new(
            MemoryStore::new()
                .with_table(COMPONENT_DESCRIPTOR_SCHEMA)
                .with_table(EVENT_SCHEMA),
        );
        let dao = ComponentDescriptorDao::new(open(store, &config));

        let err: Error = dao
            .find_by_type_page(
                ComponentType::Filter,
                &TextCursor::first(4).expect("cursor"),
            )
            .expect_err("page size above max")
            .into();

        assert_eq!(
            err.kind,
            error::ErrorKind::Query(error::QueryErrorKind::InvalidPageSize)
        );
    }
}
