use crate::{
    config::DbConfig,
    db::{
        Db,
        schema::{COMPONENT_DESCRIPTOR_SCHEMA, EVENT_SCHEMA},
        store::MemoryStore,
    },
    obs::sink::CountingMetricsSink,
};
use std::sync::Arc;

///
/// Fixture
///
/// In-memory store with both entity schemas registered, plus a counting
/// sink so tests can assert on executor accounting.
///

pub(crate) struct Fixture {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) metrics: Arc<CountingMetricsSink>,
    pub(crate) db: Db,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_config(DbConfig::default())
    }

    pub(crate) fn with_config(config: DbConfig) -> Self {
        let store = Arc::new(
            MemoryStore::new()
                .with_table(COMPONENT_DESCRIPTOR_SCHEMA)
                .with_table(EVENT_SCHEMA),
        );
        let metrics = Arc::new(CountingMetricsSink::default());
        let db = Db::new(store.clone())
            .with_config(config)
            .with_metrics(metrics.clone());

        Self { store, metrics, db }
    }
}
