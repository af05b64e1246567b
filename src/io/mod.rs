//! Reading and writing tables.
//!
//! Most callers should use [`load`] and [`save`] (from [`unified`]), which:
//!
//! - pick the format from the file extension (or from [`LoadOptions::format`] /
//!   [`SaveOptions::format`])
//! - optionally report success/failure/alerts to an [`IoObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]: delimited text with per-cell type detection
//! - [`snapshot`]: exact binary snapshot (rows, header, and declared types)
//! - [`text`]: fixed-width rendering (write-only)
//!
//! CSV and snapshot saves accept a row limit. A table with more rows than the limit is written
//! as numbered parts `<base>_part1<ext>`, `<base>_part2<ext>`, ... each carrying the full
//! header. [`part_paths`] finds those parts again and [`load_parts`] reads them back as one
//! table.

use std::path::{Path, PathBuf};

use crate::error::{TableError, TableResult};
use crate::types::Table;

pub mod csv;
pub mod observability;
pub mod snapshot;
pub mod text;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IoContext, IoDirection, IoObserver, IoSeverity, IoStats, StdErrObserver,
};
pub use unified::{load, save, LoadOptions, SaveOptions, TableFormat};

/// Path of split part `part` (1-based) for `path`: `dir/base.csv` becomes `dir/base_part2.csv`.
pub fn part_path(path: impl AsRef<Path>, part: usize) -> PathBuf {
    let path = path.as_ref();
    let (stem, ext) = split_name(path);
    path.with_file_name(format!("{stem}_part{part}{ext}"))
}

/// Existing split parts of `path`, ordered by part number.
///
/// Only files named exactly `<base>_part<N><ext>` next to `path` are returned. `path` itself
/// does not need to exist.
///
/// # Errors
///
/// [`TableError::Load`] if the directory cannot be searched.
pub fn part_paths(path: impl AsRef<Path>) -> TableResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let (stem, ext) = split_name(path);
    let prefix = format!("{stem}_part");
    let pattern = format!(
        "{}*{}",
        glob::Pattern::escape(&path.with_file_name(&prefix).to_string_lossy()),
        glob::Pattern::escape(&ext)
    );

    let entries = glob::glob(&pattern)
        .map_err(|e| TableError::load(Some(path), format!("invalid part pattern '{pattern}': {e}")))?;

    let mut parts = Vec::new();
    for entry in entries {
        let candidate = entry.map_err(|e| {
            let message = format!("failed to list parts of '{}'", path.display());
            let part = e.path().to_path_buf();
            TableError::load_io(&part, message, std::io::Error::from(e))
        })?;
        let number = candidate
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(prefix.as_str()))
            .and_then(|n| n.strip_suffix(ext.as_str()))
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse::<usize>().ok());
        if let Some(number) = number {
            parts.push((number, candidate));
        }
    }
    parts.sort_by_key(|(number, _)| *number);
    Ok(parts.into_iter().map(|(_, p)| p).collect())
}

/// Load every split part of `path` as a single table.
///
/// The format is taken from `options` or inferred from `path`'s extension, exactly as in
/// [`load`].
///
/// # Errors
///
/// [`TableError::Load`] if no parts exist, plus everything [`load`] can return.
pub fn load_parts(path: impl AsRef<Path>, options: &LoadOptions) -> TableResult<Table> {
    let path = path.as_ref();
    let parts = part_paths(path)?;
    if parts.is_empty() {
        return Err(TableError::load(
            Some(path),
            format!("no split parts found for '{}'", path.display()),
        ));
    }
    load(&parts, options)
}

fn split_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// A table with neither rows nor columns cannot be saved in any format.
pub(crate) fn ensure_saveable(table: &Table, path: &Path) -> TableResult<()> {
    if table.row_count() == 0 && table.column_count() == 0 {
        return Err(TableError::save(
            Some(path),
            format!("refusing to save an empty table to '{}'", path.display()),
        ));
    }
    Ok(())
}

/// Write `table` with `write`, splitting it into numbered parts when it exceeds `max_rows`.
///
/// Returns the written paths in part order.
pub(crate) fn write_split<F>(
    table: &Table,
    path: &Path,
    max_rows: Option<usize>,
    mut write: F,
) -> TableResult<Vec<PathBuf>>
where
    F: FnMut(&Table, &Path) -> TableResult<()>,
{
    ensure_saveable(table, path)?;
    let limit = match max_rows {
        Some(0) => {
            return Err(TableError::save(Some(path), "max_rows must be greater than zero"));
        }
        Some(n) if table.row_count() > n => n,
        _ => {
            write(table, path)?;
            return Ok(vec![path.to_path_buf()]);
        }
    };

    let positions: Vec<usize> = (0..table.row_count()).collect();
    let mut written = Vec::with_capacity(positions.len().div_ceil(limit));
    for (i, chunk) in positions.chunks(limit).enumerate() {
        let part = part_path(path, i + 1);
        write(&table.copy_rows(chunk), &part)?;
        written.push(part);
    }
    Ok(written)
}
