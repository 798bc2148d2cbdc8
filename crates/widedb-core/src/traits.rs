use crate::{
    db::{query::ViewModel, schema::TableSchema, statement::Clause, store::Row},
    error::InternalError,
    types::Ulid,
    value::Value,
};
use std::fmt::Debug;

///
/// EntityKind
///
/// A record kind the access layer can write to its base table and read
/// back from the base table or any of its views.
///

pub trait EntityKind: Clone + Debug + Send + Sync + Sized + 'static {
    /// Stable path used in logs, metrics, and error messages.
    const PATH: &'static str;

    /// Base table; its primary key is the natural key.
    const SCHEMA: TableSchema;

    /// Paged-search views, resolved by predicate columns and order.
    const VIEWS: &'static [ViewModel];

    /// Point view keyed by `id` alone.
    const ID_VIEW: &'static str;

    type NaturalKey: Debug;

    fn id(&self) -> Option<Ulid>;

    fn set_id(&mut self, id: Ulid);

    fn natural_key(&self) -> Self::NaturalKey;

    /// Equality clauses covering the full base-table primary key.
    fn natural_key_clauses(key: &Self::NaturalKey) -> Vec<Clause>;

    /// Every column written on insert, including `id`.
    fn to_values(&self) -> Vec<(&'static str, Value)>;

    fn from_row(row: &Row) -> Result<Self, InternalError>;
}
