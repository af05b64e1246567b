//! Row selection by position range or by first-column key, and the shared [`TableView`].

use std::ops::{Deref, DerefMut};

use crate::error::{TableError, TableResult};
use crate::processor::TableProcessor;
use crate::types::{Table, Value};

/// A processor over rows shared with another table.
///
/// Produced by the `view_*` and [`TableProcessor::filter_view`] methods. The view's rows and
/// declared column types are the same storage as the source's: arithmetic or
/// [`TableProcessor::set_values`] through the view changes the source, and changes to the source
/// show up in the view. Padding a short row (when writing a column past its end) is shared
/// too.
///
/// Every [`TableProcessor`] operation is available through [`Deref`]/[`DerefMut`]. Use
/// [`TableView::to_processor`] to get an independent copy.
#[derive(Debug)]
pub struct TableView {
    inner: TableProcessor,
}

impl TableView {
    pub(crate) fn new(table: Table) -> Self {
        Self {
            inner: TableProcessor::new(table),
        }
    }

    /// Deep copy of the viewed rows into a processor that shares nothing with the source.
    pub fn to_processor(&self) -> TableProcessor {
        self.inner.clone()
    }
}

impl Deref for TableView {
    type Target = TableProcessor;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TableView {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl TableProcessor {
    /// Copy of the row at `start`, or of rows `[start, stop)` when `stop` is given.
    ///
    /// # Errors
    ///
    /// [`TableError::Table`] unless `start < row_count`, and, with `stop`,
    /// `start < stop <= row_count`.
    pub fn rows_by_number(&self, start: usize, stop: Option<usize>) -> TableResult<TableProcessor> {
        let positions = self.number_positions(start, stop)?;
        Ok(TableProcessor::new(self.table().copy_rows(&positions)))
    }

    /// Like [`Self::rows_by_number`], but the result shares rows with `self`.
    pub fn view_by_number(&self, start: usize, stop: Option<usize>) -> TableResult<TableView> {
        let positions = self.number_positions(start, stop)?;
        Ok(TableView::new(self.table().share_rows(&positions)))
    }

    /// Copy of the rows whose first cell equals one of `keys`, in table order.
    ///
    /// Matching is exact: `Int64(1)` does not match `Float64(1.0)` or `Utf8("1")`. Rows with
    /// no cells never match. A table without rows yields an empty table with the same header,
    /// whatever the keys.
    ///
    /// # Errors
    ///
    /// [`TableError::Table`] if `keys` is empty and the table has rows.
    pub fn rows_by_index(&self, keys: &[Value]) -> TableResult<TableProcessor> {
        let positions = self.index_positions(keys)?;
        Ok(TableProcessor::new(self.table().copy_rows(&positions)))
    }

    /// Like [`Self::rows_by_index`], but the result shares rows with `self`.
    pub fn view_by_index(&self, keys: &[Value]) -> TableResult<TableView> {
        let positions = self.index_positions(keys)?;
        Ok(TableView::new(self.table().share_rows(&positions)))
    }

    fn number_positions(&self, start: usize, stop: Option<usize>) -> TableResult<Vec<usize>> {
        let rows = self.table().row_count();
        if start >= rows {
            return Err(TableError::table(format!(
                "start row {start} out of range for {rows} row(s)"
            )));
        }
        match stop {
            None => Ok(vec![start]),
            Some(stop) if stop > rows => Err(TableError::table(format!(
                "stop row {stop} out of range for {rows} row(s)"
            ))),
            Some(stop) if start >= stop => Err(TableError::table(format!(
                "start row {start} must be less than stop row {stop}"
            ))),
            Some(stop) => Ok((start..stop).collect()),
        }
    }

    fn index_positions(&self, keys: &[Value]) -> TableResult<Vec<usize>> {
        if self.table().row_count() == 0 {
            return Ok(Vec::new());
        }
        if keys.is_empty() {
            return Err(TableError::table("no keys given for row lookup"));
        }
        Ok(self
            .table()
            .shared_rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.borrow().first().is_some_and(|first| keys.contains(first)))
            .map(|(i, _)| i)
            .collect())
    }
}
