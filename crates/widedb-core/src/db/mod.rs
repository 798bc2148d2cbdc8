//! Module: db
//! Responsibility: the data-access layer over a wide-column store.
//! Does not own: connection management or the store's wire protocol.
//! Boundary: access objects in `dao` are the public entry points; everything
//! else is the shared cursor, query, and write machinery they compose.

pub mod cursor;
pub mod dao;
pub mod direction;
pub mod executor;
pub mod query;
pub mod response;
pub mod schema;
pub mod statement;
pub mod store;

use crate::{
    config::DbConfig,
    db::{
        statement::Statement,
        store::{ResultSet, Session, StoreError},
    },
    error::InternalError,
    obs::sink::{MetricsEvent, MetricsSink, NoopMetricsSink},
    types::{Generator, Ulid},
};
use std::{
    fmt,
    sync::{Arc, Mutex},
};

///
/// Db
///
/// Handle shared by every access object: the injected store session, the
/// id generator, the metrics sink, and runtime config. Cloning is cheap and
/// clones share the same session and generator.
///

#[derive(Clone)]
pub struct Db {
    session: Arc<dyn Session>,
    sink: Arc<dyn MetricsSink>,
    ids: Arc<Mutex<Generator>>,
    config: DbConfig,
}

impl Db {
    #[must_use]
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            sink: Arc::new(NoopMetricsSink),
            ids: Arc::new(Mutex::new(Generator::default())),
            config: DbConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DbConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DbConfig {
        &self.config
    }

    // One request/response exchange with the store.
    pub(crate) fn execute(&self, statement: &Statement) -> Result<ResultSet, StoreError> {
        if self.config.debug {
            tracing::debug!(%statement, "execute statement");
        } else {
            tracing::trace!(%statement, "execute statement");
        }

        let result = self.session.execute(statement);
        if let Err(err) = &result {
            tracing::warn!(table = statement.table(), error = %err, "statement failed");
        }

        result
    }

    pub(crate) fn generate_id(&self) -> Result<Ulid, InternalError> {
        let mut generator = self
            .ids
            .lock()
            .map_err(|_| InternalError::executor_internal("id generator lock poisoned"))?;

        generator
            .generate()
            .map_err(|err| InternalError::executor_internal(format!("id generation failed: {err}")))
    }

    pub(crate) fn sink(&self) -> &dyn MetricsSink {
        self.sink.as_ref()
    }

    pub(crate) fn record(&self, event: MetricsEvent) {
        self.sink.record(event);
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
