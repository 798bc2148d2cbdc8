use thiserror::Error as ThisError;

///
/// CursorError
///
/// Cursor construction and token decode failures. All are local and
/// raised before any storage call.
///

#[derive(Debug, ThisError)]
pub enum CursorError {
    #[error("invalid page size {page_size}: must be between 1 and {max}")]
    InvalidPageSize { page_size: u32, max: u32 },

    #[error("invalid cursor token: {reason}")]
    InvalidToken { reason: String },

    #[error("unsupported cursor token version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("cursor token does not match this query: expected={expected}, actual={actual}")]
    SignatureMismatch { expected: String, actual: String },
}

impl CursorError {
    pub(crate) fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
