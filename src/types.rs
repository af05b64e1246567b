//! Core data model types.
//!
//! A [`Table`] is a row-major grid of [`Value`]s with an ordered column header and an advisory
//! per-column [`DataType`] map ([`ColumnTypes`]).
//!
//! Row storage is reference counted: every row lives behind an `Rc<RefCell<_>>` so that a
//! [`crate::processing::TableView`] can share rows with the table it was selected from. Tables
//! created any other way (construction, loading, [`Clone`], the copying selection methods) own
//! rows that nothing else references.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Logical data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// Returns `true` for types that arithmetic accepts as its left operand.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64 | Self::Bool)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
        };
        f.write_str(name)
    }
}

/// A single value stored in a [`Table`] cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Runtime type of the value, `None` for [`Value::Null`].
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int64(_) => Some(DataType::Int64),
            Self::Float64(_) => Some(DataType::Float64),
            Self::Bool(_) => Some(DataType::Bool),
            Self::Utf8(_) => Some(DataType::Utf8),
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Floats always carry a fractional part (`2.0`, not `2`) so that the text form of a float
/// reads back as a float. Null renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Declared column types, keyed by column position.
///
/// This is the only place a column's type is recorded; name-keyed views are derived from it
/// with [`ColumnTypes::by_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTypes(BTreeMap<usize, DataType>);

impl ColumnTypes {
    /// Create an empty type map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared type of the column at `index`, if any.
    pub fn get(&self, index: usize) -> Option<DataType> {
        self.0.get(&index).copied()
    }

    /// Declare the type of the column at `index`.
    pub fn insert(&mut self, index: usize, data_type: DataType) {
        self.0.insert(index, data_type);
    }

    /// Number of columns with a declared type.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no column has a declared type.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(position, type)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DataType)> + '_ {
        self.0.iter().map(|(&idx, &ty)| (idx, ty))
    }

    /// Name-keyed view of the declared types.
    ///
    /// Positions without a matching column name are skipped. With duplicate column names the
    /// last position wins.
    pub fn by_name(&self, columns: &[String]) -> BTreeMap<String, DataType> {
        self.iter()
            .filter_map(|(idx, ty)| columns.get(idx).map(|name| (name.clone(), ty)))
            .collect()
    }
}

impl FromIterator<(usize, DataType)> for ColumnTypes {
    fn from_iter<I: IntoIterator<Item = (usize, DataType)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One row of values.
pub type Row = Vec<Value>;

/// A row that may be shared between a table and its views.
pub type SharedRow = Rc<RefCell<Row>>;

/// In-memory tabular data: ordered column names, row-major values, declared column types.
///
/// Rows may be shorter or longer than the header; missing trailing cells read as null.
///
/// [`Clone`] performs a deep copy, so a cloned table never aliases its source.
pub struct Table {
    columns: Vec<String>,
    rows: Vec<SharedRow>,
    types: Rc<RefCell<ColumnTypes>>,
}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// When both `columns` and `rows` are non-empty, each column's type is inferred from the
    /// first non-null value in that column (scanning rows in order). Columns with no non-null
    /// value default to [`DataType::Utf8`].
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let types = infer_column_types(&columns, &rows);
        Self::from_parts(columns, rows, types)
    }

    /// Create a table with an explicit type map, skipping inference.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Row>, types: ColumnTypes) -> Self {
        Self {
            columns,
            rows: rows.into_iter().map(|r| Rc::new(RefCell::new(r))).collect(),
            types: Rc::new(RefCell::new(types)),
        }
    }

    /// Create a table with a header and no rows.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self::from_parts(columns, Vec::new(), ColumnTypes::new())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns in the header.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Alias for [`Self::row_count`].
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One-line shape summary, e.g. `Table(rows=2, columns=3)`.
    pub fn summary(&self) -> String {
        format!("Table(rows={}, columns={})", self.row_count(), self.column_count())
    }

    /// Copy of the row at `index`.
    pub fn row(&self, index: usize) -> Option<Row> {
        self.rows.get(index).map(|r| r.borrow().clone())
    }

    /// Copy of all rows.
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows.iter().map(|r| r.borrow().clone()).collect()
    }

    /// Raw (uncoerced) value at `row`, `column`. `None` if either is out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<Value> {
        self.rows.get(row)?.borrow().get(column).cloned()
    }

    /// Append a row. Its type is not re-inferred.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(Rc::new(RefCell::new(row)));
    }

    /// Copy of the declared column types.
    pub fn column_types(&self) -> ColumnTypes {
        self.types.borrow().clone()
    }

    /// Declared type of the column at `index`.
    pub fn declared_type(&self, index: usize) -> Option<DataType> {
        self.types.borrow().get(index)
    }

    pub(crate) fn declare_type(&self, index: usize, data_type: DataType) {
        self.types.borrow_mut().insert(index, data_type);
    }

    /// Returns `true` if `self` and `other` share row storage or the type map, i.e. one is a
    /// view of the other (or both are views of the same table).
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.types, &other.types)
            || self
                .rows
                .iter()
                .any(|r| other.rows.iter().any(|o| Rc::ptr_eq(r, o)))
    }

    pub(crate) fn shared_rows(&self) -> &[SharedRow] {
        &self.rows
    }

    /// New table with deep copies of the rows at `positions`, the header, and the type map.
    pub(crate) fn copy_rows(&self, positions: &[usize]) -> Self {
        let rows = positions
            .iter()
            .map(|&i| self.rows[i].borrow().clone())
            .collect();
        Self::from_parts(self.columns.clone(), rows, self.column_types())
    }

    /// New table whose rows at `positions` and type map alias `self`.
    pub(crate) fn share_rows(&self, positions: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: positions.iter().map(|&i| Rc::clone(&self.rows[i])).collect(),
            types: Rc::clone(&self.types),
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), ColumnTypes::new())
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self::from_parts(self.columns.clone(), self.to_rows(), self.column_types())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| *a.borrow() == *b.borrow())
            && *self.types.borrow() == *other.types.borrow()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("rows", &self.to_rows())
            .field("column_types", &*self.types.borrow())
            .finish()
    }
}

/// Renders the fixed-width text layout (see [`crate::io::text::render_table`]).
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::io::text::render_table(self))
    }
}

fn infer_column_types(columns: &[String], rows: &[Row]) -> ColumnTypes {
    if columns.is_empty() || rows.is_empty() {
        return ColumnTypes::new();
    }
    (0..columns.len())
        .map(|idx| {
            let inferred = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .find_map(Value::data_type)
                .unwrap_or(DataType::Utf8);
            (idx, inferred)
        })
        .collect()
}
