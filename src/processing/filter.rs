//! Row filtering by boolean mask.

use super::TableView;
use crate::error::{TableError, TableResult};
use crate::processor::TableProcessor;

impl TableProcessor {
    /// Returns a copy of the rows whose `mask` entry is `true`, in table order.
    ///
    /// Masks usually come from the comparison methods ([`TableProcessor::gr`] and friends).
    ///
    /// # Errors
    ///
    /// [`TableError::Table`] if `mask.len()` differs from the row count.
    pub fn filter_rows(&self, mask: &[bool]) -> TableResult<TableProcessor> {
        let positions = self.mask_positions(mask)?;
        Ok(TableProcessor::new(self.table().copy_rows(&positions)))
    }

    /// Like [`Self::filter_rows`], but the result shares rows with `self`.
    pub fn filter_view(&self, mask: &[bool]) -> TableResult<TableView> {
        let positions = self.mask_positions(mask)?;
        Ok(TableView::new(self.table().share_rows(&positions)))
    }

    fn mask_positions(&self, mask: &[bool]) -> TableResult<Vec<usize>> {
        let rows = self.table().row_count();
        if mask.len() != rows {
            return Err(TableError::table(format!(
                "mask length ({}) does not match row count ({rows})",
                mask.len()
            )));
        }
        Ok(mask
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i)
            .collect())
    }
}
