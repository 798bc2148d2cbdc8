use crate::{error::InternalError, types::Ulid, value::Value};
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

///
/// Row
///
/// One decoded result row: column name to value. Columns the store did
/// not return read as `Value::Null`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, column: &str) -> &Value {
        self.0.get(column).unwrap_or(&NULL)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    //
    // Typed accessors
    //

    /// Required text column.
    pub fn text(&self, entity_path: &str, column: &str) -> Result<String, InternalError> {
        match self.get(column) {
            Value::Text(s) => Ok(s.clone()),
            other => Err(mismatch(entity_path, column, "text", other)),
        }
    }

    /// Nullable text column.
    pub fn opt_text(&self, entity_path: &str, column: &str) -> Result<Option<String>, InternalError> {
        match self.get(column) {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(mismatch(entity_path, column, "text", other)),
        }
    }

    /// Required ulid column.
    pub fn ulid(&self, entity_path: &str, column: &str) -> Result<Ulid, InternalError> {
        match self.get(column) {
            Value::Ulid(u) => Ok(*u),
            other => Err(mismatch(entity_path, column, "ulid", other)),
        }
    }

    /// Nullable JSON document stored as text.
    pub fn json(
        &self,
        entity_path: &str,
        column: &str,
    ) -> Result<Option<serde_json::Value>, InternalError> {
        let Some(text) = self.opt_text(entity_path, column)? else {
            return Ok(None);
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| InternalError::row_corruption(entity_path, column, err))
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        )
    }
}

fn mismatch(entity_path: &str, column: &str, expected: &str, found: &Value) -> InternalError {
    InternalError::row_corruption(
        entity_path,
        column,
        format!("expected {expected}, found {}", found.type_label()),
    )
}
