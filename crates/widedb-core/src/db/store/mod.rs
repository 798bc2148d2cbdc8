//! Module: store
//! Responsibility: the storage-collaborator port and the result shapes it returns.
//! Does not own: statement construction or entity decoding.
//! Boundary: `Session::execute` is the single call access objects make.

mod error;
mod memory;
mod row;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use row::Row;

use crate::db::statement::Statement;

///
/// Session
///
/// Long-lived handle to the wide-column store. One call is one
/// request/response exchange; implementations must be safe to share
/// across threads.
///

pub trait Session: Send + Sync {
    fn execute(&self, statement: &Statement) -> Result<ResultSet, StoreError>;
}

///
/// ResultSet
///
/// Rows returned by a statement plus the conditional-apply flag.
/// Unconditional statements always report `applied = true`; a failed
/// conditional insert or delete reports `false` and carries the existing
/// row, if any.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
    applied: bool,
}

impl ResultSet {
    #[must_use]
    pub const fn applied(rows: Vec<Row>) -> Self {
        Self {
            rows,
            applied: true,
        }
    }

    #[must_use]
    pub const fn not_applied(existing: Vec<Row>) -> Self {
        Self {
            rows: existing,
            applied: false,
        }
    }

    #[must_use]
    pub const fn was_applied(&self) -> bool {
        self.applied
    }

    #[must_use]
    pub const fn rows(&self) -> &[Row] {
        self.rows.as_slice()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
