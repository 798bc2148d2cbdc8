//! Module: statement
//! Responsibility: executable statement shapes handed to the storage session.
//! Does not own: view selection or cursor semantics.
//! Boundary: the only vocabulary shared between access objects and stores.

#[cfg(test)]
mod tests;

use crate::{db::direction::Direction, value::Value};
use std::{cmp::Ordering, fmt};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// Does `left.cmp(right) == ordering` satisfy `left <op> right`?
    #[must_use]
    pub const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => matches!(ordering, Ordering::Equal),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Lte => !matches!(ordering, Ordering::Greater),
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Gte => !matches!(ordering, Ordering::Less),
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

///
/// Clause
///
/// One relation in a WHERE list. `Tuple` compares several clustering
/// columns lexicographically, the way `(a, b) > (?, ?)` does in CQL.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Clause {
    Compare {
        column: &'static str,
        op: CompareOp,
        value: Value,
    },
    Tuple {
        columns: Vec<&'static str>,
        op: CompareOp,
        values: Vec<Value>,
    },
}

impl Clause {
    #[must_use]
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn compare(column: &'static str, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn tuple(columns: Vec<&'static str>, op: CompareOp, values: Vec<Value>) -> Self {
        Self::Tuple {
            columns,
            op,
            values,
        }
    }

    /// Column name when this is an equality on a single column.
    #[must_use]
    pub const fn equality_column(&self) -> Option<&'static str> {
        match self {
            Self::Compare {
                column,
                op: CompareOp::Eq,
                ..
            } => Some(*column),
            _ => None,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { column, op, value } => {
                write!(f, "{column} {} {value}", op.symbol())
            }
            Self::Tuple {
                columns,
                op,
                values,
            } => {
                let values = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({}) {} ({values})", columns.join(", "), op.symbol())
            }
        }
    }
}

///
/// OrderBy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    #[must_use]
    pub const fn new(column: &'static str, direction: Direction) -> Self {
        Self { column, direction }
    }
}

///
/// Select
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Select {
    pub table: &'static str,
    pub clauses: Vec<Clause>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u32>,
}

impl Select {
    #[must_use]
    pub const fn from(table: &'static str) -> Self {
        Self {
            table,
            clauses: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order_by.push(OrderBy::new(column, direction));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

///
/// Insert
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insert {
    pub table: &'static str,
    pub values: Vec<(&'static str, Value)>,
    pub if_not_exists: bool,
}

impl Insert {
    #[must_use]
    pub const fn into(table: &'static str) -> Self {
        Self {
            table,
            values: Vec::new(),
            if_not_exists: false,
        }
    }

    #[must_use]
    pub fn value(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

///
/// Delete
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delete {
    pub table: &'static str,
    pub clauses: Vec<Clause>,
    pub conditions: Vec<Clause>,
    pub if_exists: bool,
}

impl Delete {
    #[must_use]
    pub const fn from(table: &'static str) -> Self {
        Self {
            table,
            clauses: Vec::new(),
            conditions: Vec::new(),
            if_exists: false,
        }
    }

    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Apply only when the row exists.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Apply only when the existing row satisfies `condition`.
    #[must_use]
    pub fn only_if(mut self, condition: Clause) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        self.if_exists || !self.conditions.is_empty()
    }
}

///
/// Statement
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Delete(Delete),
}

impl Statement {
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Select(s) => s.table,
            Self::Insert(s) => s.table,
            Self::Delete(s) => s.table,
        }
    }
}

impl From<Select> for Statement {
    fn from(s: Select) -> Self {
        Self::Select(s)
    }
}

impl From<Insert> for Statement {
    fn from(s: Insert) -> Self {
        Self::Insert(s)
    }
}

impl From<Delete> for Statement {
    fn from(s: Delete) -> Self {
        Self::Delete(s)
    }
}

fn write_where(f: &mut fmt::Formatter<'_>, clauses: &[Clause]) -> fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        let keyword = if i == 0 { " WHERE " } else { " AND " };
        write!(f, "{keyword}{clause}")?;
    }

    Ok(())
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT * FROM {}", self.table)?;
        write_where(f, &self.clauses)?;
        for (i, order) in self.order_by.iter().enumerate() {
            let keyword = if i == 0 { " ORDER BY " } else { ", " };
            write!(f, "{keyword}{} {}", order.column, order.direction.keyword())?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }

        write!(f, ";")
    }
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .values
            .iter()
            .map(|(c, _)| *c)
            .collect::<Vec<_>>()
            .join(",");
        let values = self
            .values
            .iter()
            .map(|(_, v)| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "INSERT INTO {}({columns}) VALUES ({values})", self.table)?;
        if self.if_not_exists {
            write!(f, " IF NOT EXISTS")?;
        }

        write!(f, ";")
    }
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        write_where(f, &self.clauses)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            let keyword = if i == 0 { " IF " } else { " AND " };
            write!(f, "{keyword}{condition}")?;
        }
        if self.if_exists && self.conditions.is_empty() {
            write!(f, " IF EXISTS")?;
        }

        write!(f, ";")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => s.fmt(f),
            Self::Insert(s) => s.fmt(f),
            Self::Delete(s) => s.fmt(f),
        }
    }
}
