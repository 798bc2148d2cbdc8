use crate::value::Value;

///
/// Predicates
///
/// Ordered set of column equality constraints. Columns must match the key
/// columns of one view; the builder reorders them into that view's order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Predicates(Vec<(&'static str, Value)>);

impl Predicates {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((column, value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(|(c, _)| *c).collect()
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
