use crate::{
    db::{
        direction::Direction,
        schema::TableSchema,
        statement::{Clause, Delete, Insert, Select, Statement},
        store::{ResultSet, Row, Session, StoreError},
    },
    value::Value,
};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering as AtomicOrdering},
    },
};

///
/// MemoryStore
///
/// In-process wide-column store. Base tables are keyed by their declared
/// primary key; views are projections of their base table maintained by
/// the store itself. Every statement runs under one lock, which makes
/// `IF NOT EXISTS` and conditional deletes linearizable per key.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    unavailable: AtomicBool,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: BTreeMap<&'static str, TableData>,
    views: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug)]
struct TableData {
    schema: TableSchema,
    rows: BTreeMap<Vec<Value>, Row>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base table and its views.
    #[must_use]
    pub fn with_table(self, schema: TableSchema) -> Self {
        if let Ok(mut state) = self.state.lock() {
            for view in schema.views {
                state.views.insert(*view, schema.name);
            }
            state.tables.insert(
                schema.name,
                TableData {
                    schema,
                    rows: BTreeMap::new(),
                },
            );
        }

        self
    }

    /// Toggle simulated outage; while unavailable every statement fails.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, AtomicOrdering::SeqCst);
    }

    /// Number of rows currently in a base table.
    pub fn row_count(&self, table: &str) -> Result<usize, StoreError> {
        let state = self.lock()?;

        Ok(state.tables.get(table).map_or(0, |t| t.rows.len()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }
}

impl Session for MemoryStore {
    fn execute(&self, statement: &Statement) -> Result<ResultSet, StoreError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::unavailable(format!(
                "memory store offline while executing against '{}'",
                statement.table()
            )));
        }

        let mut state = self.lock()?;
        match statement {
            Statement::Select(select) => state.select(select),
            Statement::Insert(insert) => state.insert(insert),
            Statement::Delete(delete) => state.delete(delete),
        }
    }
}

impl MemoryState {
    // Views and base tables are both readable; only base tables are writable.
    fn readable(&self, name: &str) -> Result<&TableData, StoreError> {
        let base = self.views.get(name).copied().unwrap_or(name);

        self.tables
            .get(base)
            .ok_or_else(|| StoreError::invalid_statement(name, "unknown table or view"))
    }

    fn writable(&mut self, name: &str) -> Result<&mut TableData, StoreError> {
        if self.views.contains_key(name) {
            return Err(StoreError::invalid_statement(
                name,
                "cannot modify a materialized view",
            ));
        }

        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::invalid_statement(name, "unknown table"))
    }

    fn select(&self, select: &Select) -> Result<ResultSet, StoreError> {
        let table = self.readable(select.table)?;
        let mut rows = table
            .rows
            .values()
            .filter(|row| select.clauses.iter().all(|c| clause_matches(c, row)))
            .cloned()
            .collect::<Vec<_>>();

        // stable sort keeps primary-key order among rows tied on every ordering column
        rows.sort_by(|a, b| {
            select
                .order_by
                .iter()
                .map(|order| {
                    let ordering = a.get(order.column).cmp(b.get(order.column));
                    match order.direction {
                        Direction::Asc => ordering,
                        Direction::Desc => ordering.reverse(),
                    }
                })
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        if let Some(limit) = select.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(ResultSet::applied(rows))
    }

    fn insert(&mut self, insert: &Insert) -> Result<ResultSet, StoreError> {
        let table = self.writable(insert.table)?;
        let row = insert.values.iter().cloned().collect::<Row>();
        let key = table
            .schema
            .primary_key
            .iter()
            .map(|column| {
                let value = row.get(column);
                if value.is_null() {
                    Err(StoreError::invalid_statement(
                        insert.table,
                        format!("missing primary key column '{column}'"),
                    ))
                } else {
                    Ok(value.clone())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if insert.if_not_exists
            && let Some(existing) = table.rows.get(&key)
        {
            return Ok(ResultSet::not_applied(vec![existing.clone()]));
        }
        table.rows.insert(key, row);

        Ok(ResultSet::applied(Vec::new()))
    }

    fn delete(&mut self, delete: &Delete) -> Result<ResultSet, StoreError> {
        let table = self.writable(delete.table)?;
        let mut key = Vec::with_capacity(table.schema.primary_key.len());

        for column in table.schema.primary_key {
            let value = delete.clauses.iter().find_map(|clause| match clause {
                Clause::Compare { column: c, value, .. }
                    if clause.equality_column().is_some() && c == column =>
                {
                    Some(value.clone())
                }
                _ => None,
            });
            let Some(value) = value else {
                return Err(StoreError::invalid_statement(
                    delete.table,
                    format!("delete requires equality on primary key column '{column}'"),
                ));
            };
            key.push(value);
        }

        if delete.is_conditional() {
            let Some(existing) = table.rows.get(&key) else {
                return Ok(ResultSet::not_applied(Vec::new()));
            };
            if !delete.conditions.iter().all(|c| clause_matches(c, existing)) {
                return Ok(ResultSet::not_applied(vec![existing.clone()]));
            }
        }
        table.rows.remove(&key);

        Ok(ResultSet::applied(Vec::new()))
    }
}

fn clause_matches(clause: &Clause, row: &Row) -> bool {
    match clause {
        Clause::Compare { column, op, value } => op.accepts(row.get(column).cmp(value)),
        Clause::Tuple {
            columns,
            op,
            values,
        } => {
            let ordering = columns
                .iter()
                .zip(values)
                .map(|(column, value)| row.get(column).cmp(value))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal);

            op.accepts(ordering)
        }
    }
}
