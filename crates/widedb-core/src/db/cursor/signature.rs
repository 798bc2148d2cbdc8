use crate::{
    db::query::{Predicates, ViewModel},
    value::Value,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// CursorSignature
///
/// Digest of the view and equality predicates a cursor was issued for.
/// A token only resumes the exact query shape that produced it. Predicates
/// are hashed in the view's key order, so caller ordering does not matter.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CursorSignature([u8; 32]);

impl CursorSignature {
    #[must_use]
    pub fn compute(view: &ViewModel, predicates: &Predicates) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"widedb:cursor:v1");
        hash_str(&mut hasher, view.name);
        for column in view.key_columns {
            hash_str(&mut hasher, column);
            match predicates.get(column) {
                Some(value) => hash_value(&mut hasher, value),
                None => hash_value(&mut hasher, &Value::Null),
            }
        }

        Self(hasher.finalize().into())
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for CursorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

// length-prefixed so ("ab", "c") and ("a", "bc") differ
fn hash_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_be_bytes());
    hasher.update(s.as_bytes());
}

fn hash_value(hasher: &mut Sha256, value: &Value) {
    hash_str(hasher, value.type_label());
    match value {
        Value::Null => {}
        Value::Bool(v) => hasher.update([u8::from(*v)]),
        Value::Int(v) => hasher.update(v.to_be_bytes()),
        Value::Text(v) => hash_str(hasher, v),
        Value::Ulid(v) => hasher.update(v.to_bytes()),
        Value::Blob(v) => {
            hasher.update((v.len() as u64).to_be_bytes());
            hasher.update(v);
        }
    }
}
