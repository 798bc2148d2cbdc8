use crate::db::query::ViewOrder;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Configuration-level query failures; never transient.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error(
        "no {order} view of '{entity_path}' is keyed by [{}]",
        .columns.join(", ")
    )]
    UnsupportedFilterCombination {
        entity_path: &'static str,
        columns: Vec<String>,
        order: ViewOrder,
    },
}
