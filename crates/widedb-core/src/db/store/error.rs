use thiserror::Error as ThisError;

///
/// StoreError
///
/// Failures reported by the storage collaborator. Surfaced to callers
/// verbatim; the access layer never retries.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    /// The store failed, timed out, or could not be reached.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    /// The store rejected the statement shape.
    #[error("invalid statement for '{table}': {reason}")]
    InvalidStatement { table: String, reason: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn invalid_statement(table: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStatement {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}
