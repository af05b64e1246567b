//! Fixed-width text rendering.
//!
//! ```text
//! id   | name
//! --------------
//! 1    | Alice
//! 2    | Bob
//!
//! rows: 2, columns: 2
//! ```
//!
//! Each column is as wide as its widest cell or header plus two spaces; cells are
//! left-justified and joined by ` | `. Cells past the header are not shown, and missing cells
//! render blank. This format is write-only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TableError, TableResult};
use crate::types::Table;

use super::ensure_saveable;

/// Render `table` in the fixed-width layout, without a trailing newline.
///
/// A table without columns renders as `empty table`.
pub fn render_table(table: &Table) -> String {
    let columns = table.columns();
    if columns.is_empty() {
        return "empty table".to_string();
    }

    let cells: Vec<Vec<String>> = table
        .shared_rows()
        .iter()
        .map(|row| {
            let row = row.borrow();
            (0..columns.len())
                .map(|i| row.get(i).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .fold(name.chars().count(), usize::max)
                + 2
        })
        .collect();

    let header = join_padded(columns.iter(), &widths);
    let rule = "-".repeat(header.chars().count());
    let mut lines = Vec::with_capacity(cells.len() + 4);
    lines.push(header);
    lines.push(rule);
    for row in &cells {
        lines.push(join_padded(row.iter(), &widths));
    }
    lines.push(String::new());
    lines.push(format!("rows: {}, columns: {}", table.row_count(), table.column_count()));
    lines.join("\n")
}

fn join_padded<'a>(values: impl Iterator<Item = &'a String>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(v, &w)| format!("{v:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Write the rendering of `table` to `path`, followed by a newline.
///
/// Returns the written path.
///
/// # Errors
///
/// [`TableError::Save`] if the table has neither rows nor columns or the file cannot be
/// written.
pub fn save_text(table: &Table, path: impl AsRef<Path>) -> TableResult<Vec<PathBuf>> {
    let path = path.as_ref();
    ensure_saveable(table, path)?;
    let mut rendered = render_table(table);
    rendered.push('\n');
    fs::write(path, rendered)
        .map_err(|e| TableError::save_io(path, format!("failed to write '{}'", path.display()), e))?;
    Ok(vec![path.to_path_buf()])
}
