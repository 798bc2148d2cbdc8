//! Module: executor
//! Responsibility: run statements for one entity kind and shape the results.
//! Does not own: view choice (query) or cursor semantics (cursor).
//! Boundary: every executor call is one or two independent store exchanges;
//! no state is held between calls.

mod delete;
mod load;
mod save;

#[cfg(test)]
mod tests;

pub use delete::DeleteExecutor;
pub use load::LoadExecutor;
pub use save::{SaveExecutor, SaveMode};
