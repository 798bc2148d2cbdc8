//! Metrics sink boundary.
//!
//! Executors never hold counters themselves. All instrumentation flows
//! through `MetricsEvent` into the `MetricsSink` injected with the `Db`.

use crate::traits::EntityKind;
use std::{
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Load,
    Save,
    Delete,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity_path: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity_path: &'static str,
        rows_touched: u64,
    },
    ConditionNotMet {
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// NoopMetricsSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _: MetricsEvent) {}
}

///
/// CountingMetricsSink
/// Lock-free counters, one per event family.
///

#[derive(Debug, Default)]
pub struct CountingMetricsSink {
    load_calls: AtomicU64,
    save_calls: AtomicU64,
    delete_calls: AtomicU64,
    rows_loaded: AtomicU64,
    rows_deleted: AtomicU64,
    conditions_not_met: AtomicU64,
}

///
/// MetricsSnapshot
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsSnapshot {
    pub load_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,
    pub rows_loaded: u64,
    pub rows_deleted: u64,
    pub conditions_not_met: u64,
}

impl CountingMetricsSink {
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            load_calls: self.load_calls.load(Ordering::Relaxed),
            save_calls: self.save_calls.load(Ordering::Relaxed),
            delete_calls: self.delete_calls.load(Ordering::Relaxed),
            rows_loaded: self.rows_loaded.load(Ordering::Relaxed),
            rows_deleted: self.rows_deleted.load(Ordering::Relaxed),
            conditions_not_met: self.conditions_not_met.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSink for CountingMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind, .. } => {
                let counter = match kind {
                    ExecKind::Load => &self.load_calls,
                    ExecKind::Save => &self.save_calls,
                    ExecKind::Delete => &self.delete_calls,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }
            MetricsEvent::ExecFinish {
                kind, rows_touched, ..
            } => match kind {
                ExecKind::Load => {
                    self.rows_loaded.fetch_add(rows_touched, Ordering::Relaxed);
                }
                ExecKind::Delete => {
                    self.rows_deleted.fetch_add(rows_touched, Ordering::Relaxed);
                }
                ExecKind::Save => {}
            },
            MetricsEvent::ConditionNotMet { .. } => {
                self.conditions_not_met.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

///
/// Span
/// RAII guard that emits start/finish metrics events for one executor call.
/// Ensures finish accounting happens even on early return.
///

pub(crate) struct Span<'a, E: EntityKind> {
    sink: &'a dyn MetricsSink,
    kind: ExecKind,
    rows: u64,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> Span<'a, E> {
    pub(crate) fn new(sink: &'a dyn MetricsSink, kind: ExecKind) -> Self {
        sink.record(MetricsEvent::ExecStart {
            kind,
            entity_path: E::PATH,
        });

        Self {
            sink,
            kind,
            rows: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl<E: EntityKind> Drop for Span<'_, E> {
    fn drop(&mut self) {
        self.sink.record(MetricsEvent::ExecFinish {
            kind: self.kind,
            entity_path: E::PATH,
            rows_touched: self.rows,
        });
    }
}
