//! [`TableProcessor`]: a table plus the column-level read/write API the engine builds on.
//!
//! Arithmetic, comparison, and row selection are implemented on [`TableProcessor`] in
//! [`crate::processing`].

use std::collections::BTreeMap;

use crate::column::{resolve, ColumnRef};
use crate::error::{TableError, TableResult};
use crate::types::{ColumnTypes, DataType, Table, Value};

/// Owns a [`Table`] and exposes typed column access plus the operation engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProcessor {
    table: Table,
}

impl TableProcessor {
    /// Wrap `table`.
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// The wrapped table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Unwrap into the table.
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Resolve a column reference to its position.
    pub fn column_index(&self, column: impl Into<ColumnRef>) -> TableResult<usize> {
        resolve(self.table.columns(), &column.into())
    }

    /// Declared types keyed by column position.
    pub fn column_types(&self) -> ColumnTypes {
        self.table.column_types()
    }

    /// Declared types keyed by column name.
    pub fn column_types_by_name(&self) -> BTreeMap<String, DataType> {
        self.table.column_types().by_name(self.table.columns())
    }

    /// Declare column types.
    ///
    /// Every reference is resolved before any type is changed, so a failure leaves the type
    /// map untouched.
    ///
    /// # Errors
    ///
    /// [`TableError::Column`] if the table has no columns or a reference does not resolve.
    pub fn set_column_types<I, C>(&mut self, types: I) -> TableResult<()>
    where
        I: IntoIterator<Item = (C, DataType)>,
        C: Into<ColumnRef>,
    {
        if self.table.column_count() == 0 {
            return Err(TableError::column("table has no columns"));
        }
        let resolved = types
            .into_iter()
            .map(|(c, ty)| Ok((resolve(self.table.columns(), &c.into())?, ty)))
            .collect::<TableResult<Vec<_>>>()?;
        for (idx, ty) in resolved {
            self.table.declare_type(idx, ty);
        }
        Ok(())
    }

    /// Values of one column, converted to its declared type where possible.
    ///
    /// Conversion is best-effort: a value that does not convert is returned as stored. Rows
    /// too short to hold the column yield [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`TableError::Column`] if `column` does not resolve.
    pub fn get_values(&self, column: impl Into<ColumnRef>) -> TableResult<Vec<Value>> {
        let idx = self.column_index(column)?;
        Ok(self.values_at(idx))
    }

    pub(crate) fn values_at(&self, idx: usize) -> Vec<Value> {
        let declared = self.table.declared_type(idx);
        self.table
            .shared_rows()
            .iter()
            .map(|row| {
                let row = row.borrow();
                let raw = row.get(idx).unwrap_or(&Value::Null);
                match declared {
                    Some(ty) => ty.coerce_lenient(raw),
                    None => raw.clone(),
                }
            })
            .collect()
    }

    /// Replace one column's values.
    ///
    /// Rows shorter than the column are padded with [`Value::Null`]. If the column has a
    /// declared type every value is converted to it first; nothing is written unless all
    /// values convert.
    ///
    /// # Errors
    ///
    /// [`TableError::Column`] if `values.len()` differs from the row count, if `column` does
    /// not resolve, or if a value cannot be converted to the declared type.
    pub fn set_values(&mut self, values: Vec<Value>, column: impl Into<ColumnRef>) -> TableResult<()> {
        if values.len() != self.table.row_count() {
            return Err(TableError::column(format!(
                "value count ({}) does not match row count ({})",
                values.len(),
                self.table.row_count()
            )));
        }
        let idx = self.column_index(column)?;
        self.write_values(values, idx)
    }

    pub(crate) fn write_values(&mut self, values: Vec<Value>, idx: usize) -> TableResult<()> {
        let values = match self.table.declared_type(idx) {
            Some(ty) => values
                .iter()
                .map(|v| ty.coerce(v))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| TableError::column(format!("failed to store value in column {idx}: {e}")))?,
            None => values,
        };

        for (row, value) in self.table.shared_rows().iter().zip(values) {
            let mut row = row.borrow_mut();
            if row.len() <= idx {
                row.resize(idx + 1, Value::Null);
            }
            row[idx] = value;
        }
        Ok(())
    }

    /// The single value of `column` in a one-row table.
    ///
    /// # Errors
    ///
    /// [`TableError::Table`] unless the table has exactly one row; [`TableError::Column`] if
    /// `column` does not resolve.
    pub fn get_value(&self, column: impl Into<ColumnRef>) -> TableResult<Value> {
        self.ensure_single_row()?;
        let mut values = self.get_values(column)?;
        Ok(values.pop().unwrap_or(Value::Null))
    }

    /// Set the single value of `column` in a one-row table.
    ///
    /// # Errors
    ///
    /// As [`Self::get_value`], plus the conversion errors of [`Self::set_values`].
    pub fn set_value(&mut self, value: impl Into<Value>, column: impl Into<ColumnRef>) -> TableResult<()> {
        self.ensure_single_row()?;
        self.set_values(vec![value.into()], column)
    }

    fn ensure_single_row(&self) -> TableResult<()> {
        match self.table.row_count() {
            1 => Ok(()),
            n => Err(TableError::table(format!("expected exactly one row, table has {n}"))),
        }
    }

    /// Print the table to stdout in the fixed-width text layout.
    pub fn print_table(&self) {
        println!("{}", self.table);
    }
}

impl From<Table> for TableProcessor {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::TableProcessor;
    use crate::error::ErrorKind;
    use crate::types::{DataType, Table, Value};

    fn sample() -> TableProcessor {
        TableProcessor::new(Table::new(
            vec!["id".to_string(), "name".to_string(), "age".to_string()],
            vec![
                vec![Value::Int64(1), Value::from("Alice"), Value::Int64(25)],
                vec![Value::Int64(2), Value::from("Bob"), Value::Int64(30)],
                vec![Value::Int64(3), Value::from("Charlie")],
            ],
        ))
    }

    #[test]
    fn get_values_reads_short_rows_as_null() {
        let p = sample();
        assert_eq!(
            p.get_values("age").unwrap(),
            vec![Value::Int64(25), Value::Int64(30), Value::Null]
        );
    }

    #[test]
    fn get_values_is_lenient() {
        let mut p = sample();
        p.set_column_types([("name", DataType::Int64)]).unwrap();
        assert_eq!(p.get_values(1usize).unwrap()[0], Value::from("Alice"));
    }

    #[test]
    fn set_values_pads_short_rows_and_converts() {
        let mut p = sample();
        p.set_values(vec![Value::from("40"), Value::Int64(41), Value::Float64(42.7)], "age")
            .unwrap();
        assert_eq!(
            p.table().to_rows()[2],
            vec![Value::Int64(3), Value::from("Charlie"), Value::Int64(42)]
        );
        assert_eq!(p.table().cell(0, 2), Some(Value::Int64(40)));
    }

    #[test]
    fn set_values_rejects_wrong_length() {
        let mut p = sample();
        let err = p.set_values(vec![Value::Int64(1)], "age").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
    }

    #[test]
    fn set_values_is_all_or_nothing() {
        let mut p = sample();
        let before = p.table().to_rows();
        let err = p
            .set_values(vec![Value::Int64(1), Value::from("oops"), Value::Int64(3)], "age")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
        assert_eq!(p.table().to_rows(), before);
    }

    #[test]
    fn set_values_without_declared_type_stores_raw() {
        let mut p = TableProcessor::new(Table::from_parts(
            vec!["a".to_string()],
            vec![vec![Value::Int64(1)], vec![Value::Int64(2)]],
            Default::default(),
        ));
        p.set_values(vec![Value::from("x"), Value::Bool(true)], "a").unwrap();
        assert_eq!(
            p.table().to_rows(),
            vec![vec![Value::from("x")], vec![Value::Bool(true)]]
        );
    }

    #[test]
    fn single_row_accessors_require_one_row() {
        let mut p = sample();
        assert_eq!(p.get_value("id").unwrap_err().kind(), ErrorKind::Table);

        let mut one = p.rows_by_number(1, None).unwrap();
        assert_eq!(one.get_value("name").unwrap(), Value::from("Bob"));
        one.set_value(99, "id").unwrap();
        assert_eq!(one.get_value(0usize).unwrap(), Value::Int64(99));
        assert_eq!(p.set_value(1, "id").unwrap_err().kind(), ErrorKind::Table);
    }

    #[test]
    fn column_types_round_trip_by_position_and_name() {
        let mut p = sample();
        p.set_column_types([(2usize, DataType::Float64)]).unwrap();
        assert_eq!(p.column_types().get(2), Some(DataType::Float64));
        assert_eq!(p.column_types_by_name().get("age"), Some(&DataType::Float64));
        assert_eq!(p.get_values("age").unwrap()[0], Value::Float64(25.0));
    }

    #[test]
    fn set_column_types_validates_before_applying() {
        let mut p = sample();
        let err = p
            .set_column_types([("id", DataType::Utf8), ("missing", DataType::Utf8)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
        assert_eq!(p.column_types().get(0), Some(DataType::Int64));
    }

    #[test]
    fn set_column_types_requires_columns() {
        let mut p = TableProcessor::default();
        let err = p.set_column_types([(0usize, DataType::Int64)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Column);
    }
}
