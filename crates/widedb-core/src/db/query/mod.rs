//! Module: query
//! Responsibility: choose the view that serves a filter and build its select.
//! Does not own: statement execution, row decoding, or cursor advancement.
//! Boundary: pure translation from (predicates, cursor) to one `Select`.

mod builder;
mod error;
mod predicates;
mod view;


pub use error::QueryError;
pub use predicates::Predicates;
pub use view::{ViewModel, ViewOrder};

pub(crate) use builder::{SearchPlan, plan_search, resolve_view};
