//! Column references and their resolution to positions.

use std::fmt;

use crate::error::{TableError, TableResult};

/// A reference to one column, by position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    /// Zero-based column position.
    Index(usize),
    /// Column name; the first column with this name is used.
    Name(String),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(n) => write!(f, "'{n}'"),
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for ColumnRef {
    fn from(n: &str) -> Self {
        Self::Name(n.to_owned())
    }
}

impl From<String> for ColumnRef {
    fn from(n: String) -> Self {
        Self::Name(n)
    }
}

impl From<&String> for ColumnRef {
    fn from(n: &String) -> Self {
        Self::Name(n.clone())
    }
}

impl From<&ColumnRef> for ColumnRef {
    fn from(r: &ColumnRef) -> Self {
        r.clone()
    }
}

/// Resolve `column` against `columns`, returning its position.
///
/// - [`ColumnRef::Index`] is valid iff `index < columns.len()`.
/// - [`ColumnRef::Name`] is valid iff the name is present; the first match wins.
pub fn resolve(columns: &[String], column: &ColumnRef) -> TableResult<usize> {
    match column {
        ColumnRef::Index(i) if *i < columns.len() => Ok(*i),
        ColumnRef::Index(i) => Err(TableError::column(format!(
            "column index {i} out of range for {} column(s)",
            columns.len()
        ))),
        ColumnRef::Name(name) => columns.iter().position(|c| c == name).ok_or_else(|| {
            TableError::column(format!("column '{name}' not found. columns={columns:?}"))
        }),
    }
}
