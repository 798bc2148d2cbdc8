use crate::db::cursor::{CursorError, CursorSignature, PageCursor};
use serde::{Deserialize, Serialize};

/// Current cursor token wire version.
const CURSOR_TOKEN_VERSION: u8 = 1;

/// Upper bound on encoded token size accepted by `decode`.
pub(crate) const MAX_CURSOR_TOKEN_BYTES: usize = 4 * 1024;

///
/// CursorTokenWire
///

#[derive(Deserialize, Serialize)]
struct CursorTokenWire {
    version: u8,
    signature: [u8; 32],
    cursor: PageCursor,
}

///
/// CursorToken
/// Opaque cursor payload bound to a query signature.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorToken {
    signature: CursorSignature,
    cursor: PageCursor,
}

impl CursorToken {
    #[must_use]
    pub const fn new(signature: CursorSignature, cursor: PageCursor) -> Self {
        Self { signature, cursor }
    }

    #[must_use]
    pub const fn signature(&self) -> CursorSignature {
        self.signature
    }

    #[must_use]
    pub const fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    #[must_use]
    pub fn into_cursor(self) -> PageCursor {
        self.cursor
    }

    pub fn encode(&self) -> Result<Vec<u8>, CursorError> {
        let wire = CursorTokenWire {
            version: CURSOR_TOKEN_VERSION,
            signature: self.signature.into_bytes(),
            cursor: self.cursor.clone(),
        };

        serde_cbor::to_vec(&wire).map_err(|err| CursorError::invalid_token(err.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CursorError> {
        if bytes.len() > MAX_CURSOR_TOKEN_BYTES {
            return Err(CursorError::invalid_token(format!(
                "token is {} bytes, limit is {MAX_CURSOR_TOKEN_BYTES}",
                bytes.len()
            )));
        }

        let wire: CursorTokenWire = serde_cbor::from_slice(bytes)
            .map_err(|err| CursorError::invalid_token(err.to_string()))?;

        // version first so compatibility handling stays in one place
        if wire.version != CURSOR_TOKEN_VERSION {
            return Err(CursorError::UnsupportedVersion {
                version: wire.version,
            });
        }

        Ok(Self::new(
            CursorSignature::from_bytes(wire.signature),
            wire.cursor,
        ))
    }

    /// Unwrap the cursor after checking it was issued for `expected`.
    pub fn verify(self, expected: CursorSignature) -> Result<PageCursor, CursorError> {
        if self.signature != expected {
            return Err(CursorError::SignatureMismatch {
                expected: expected.to_string(),
                actual: self.signature.to_string(),
            });
        }

        Ok(self.cursor)
    }

    #[cfg(test)]
    pub(crate) fn encode_with_version_for_test(&self, version: u8) -> Result<Vec<u8>, CursorError> {
        let wire = CursorTokenWire {
            version,
            signature: self.signature.into_bytes(),
            cursor: self.cursor.clone(),
        };

        serde_cbor::to_vec(&wire).map_err(|err| CursorError::invalid_token(err.to_string()))
    }
}
