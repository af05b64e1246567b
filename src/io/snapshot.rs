//! Binary snapshot IO.
//!
//! A snapshot stores the header, the raw rows, and the declared column types exactly, so
//! loading one gives back a table equal to the one saved (no re-inference).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::types::{ColumnTypes, Row, Table};

use super::write_split;

#[derive(Debug, Serialize, Deserialize)]
struct TableSnapshot {
    columns: Vec<String>,
    data: Vec<Row>,
    column_types: ColumnTypes,
}

impl From<&Table> for TableSnapshot {
    fn from(table: &Table) -> Self {
        Self {
            columns: table.columns().to_vec(),
            data: table.to_rows(),
            column_types: table.column_types(),
        }
    }
}

/// Load one or more snapshot files into a single table.
///
/// Rows are concatenated in file order. The declared column types are those of the first
/// file.
///
/// # Errors
///
/// [`TableError::Load`] if `paths` is empty, a file cannot be read or decoded, or a file's
/// header differs from the first file's.
pub fn load_snapshot<P: AsRef<Path>>(paths: &[P]) -> TableResult<Table> {
    let mut first: Option<TableSnapshot> = None;
    for path in paths {
        let path = path.as_ref();
        let snapshot = read_snapshot(path)?;
        match first.as_mut() {
            None => first = Some(snapshot),
            Some(acc) => {
                if acc.columns != snapshot.columns {
                    return Err(TableError::load(
                        Some(path),
                        format!(
                            "column mismatch in '{}': expected {:?}, found {:?}",
                            path.display(),
                            acc.columns,
                            snapshot.columns
                        ),
                    ));
                }
                acc.data.extend(snapshot.data);
            }
        }
    }

    let snapshot = first.ok_or_else(|| TableError::load(None, "no files given to load"))?;
    Ok(Table::from_parts(snapshot.columns, snapshot.data, snapshot.column_types))
}

fn read_snapshot(path: &Path) -> TableResult<TableSnapshot> {
    let bytes = fs::read(path)
        .map_err(|e| TableError::load_io(path, format!("failed to read '{}'", path.display()), e))?;
    bincode::deserialize(&bytes).map_err(|e| {
        TableError::load(
            Some(path),
            format!("failed to decode snapshot '{}': {e}", path.display()),
        )
    })
}

/// Save `table` as a binary snapshot.
///
/// With `max_rows`, a table with more rows is split into `<base>_part<N><ext>` files, each
/// carrying the header and the full type map.
///
/// Returns the written paths.
///
/// # Errors
///
/// [`TableError::Save`] if the table has neither rows nor columns, `max_rows` is zero, or a
/// file cannot be encoded or written.
pub fn save_snapshot(
    table: &Table,
    path: impl AsRef<Path>,
    max_rows: Option<usize>,
) -> TableResult<Vec<PathBuf>> {
    write_split(table, path.as_ref(), max_rows, write_snapshot_file)
}

fn write_snapshot_file(table: &Table, path: &Path) -> TableResult<()> {
    let bytes = bincode::serialize(&TableSnapshot::from(table)).map_err(|e| {
        TableError::save(
            Some(path),
            format!("failed to encode snapshot for '{}': {e}", path.display()),
        )
    })?;
    fs::write(path, bytes)
        .map_err(|e| TableError::save_io(path, format!("failed to write '{}'", path.display()), e))
}
