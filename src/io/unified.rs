//! Unified load/save entrypoints.
//!
//! Most callers should use [`load`] and [`save`], which dispatch on a [`TableFormat`]:
//!
//! - If [`LoadOptions::format`] / [`SaveOptions::format`] is `None`, the format is inferred
//!   from the file extension.
//! - If an [`IoObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{TableError, TableResult};
use crate::types::Table;

use super::observability::{IoContext, IoDirection, IoObserver, IoSeverity, IoStats};
use super::{csv, snapshot, text};

const DEFAULT_DELIMITER: u8 = b',';

/// Supported table file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Delimited text (`.csv`, `.tsv`).
    Csv,
    /// Binary snapshot (`.bin`, `.snapshot`, `.tbl`).
    Snapshot,
    /// Fixed-width text rendering (`.txt`). Save only.
    Text,
}

impl TableFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" => Some(Self::Csv),
            "bin" | "snapshot" | "tbl" => Some(Self::Snapshot),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Options controlling [`load`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from the first path's extension.
    pub format: Option<TableFormat>,
    /// Field delimiter for [`TableFormat::Csv`]. Left at `,`, a `.tsv` path reads as
    /// tab-separated.
    pub delimiter: u8,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IoObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IoSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimiter", &char::from(self.delimiter))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: DEFAULT_DELIMITER,
            observer: None,
            alert_at_or_above: IoSeverity::Critical,
        }
    }
}

/// Options controlling [`save`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct SaveOptions {
    /// If `None`, auto-detect format from the path's extension.
    pub format: Option<TableFormat>,
    /// Field delimiter for [`TableFormat::Csv`]. Left at `,`, a `.tsv` path is written
    /// tab-separated.
    pub delimiter: u8,
    /// Split into `<base>_part<N><ext>` files of at most this many rows. Ignored by
    /// [`TableFormat::Text`].
    pub max_rows: Option<usize>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IoObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IoSeverity,
}

impl fmt::Debug for SaveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveOptions")
            .field("format", &self.format)
            .field("delimiter", &char::from(self.delimiter))
            .field("max_rows", &self.max_rows)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: DEFAULT_DELIMITER,
            max_rows: None,
            observer: None,
            alert_at_or_above: IoSeverity::Critical,
        }
    }
}

/// Load one or more files into a single table.
///
/// - If `options.format` is `None`, the format is inferred from the first path's extension.
/// - All paths are read with the same format; headers must agree across files.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and file counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use table_processing::io::{load, LoadOptions};
///
/// # fn main() -> Result<(), table_processing::TableError> {
/// // Uses `.csv` to select delimited loading.
/// let table = load(&["january.csv", "february.csv"], &LoadOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use table_processing::io::{load, IoSeverity, LoadOptions, StdErrObserver};
///
/// let opts = LoadOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: IoSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = load(&["does_not_exist.csv"], &opts).unwrap_err();
/// ```
///
/// # Errors
///
/// [`TableError::Load`] if `paths` is empty, the format cannot be inferred, the format is
/// [`TableFormat::Text`], or the format-specific loader fails.
pub fn load<P: AsRef<Path>>(paths: &[P], options: &LoadOptions) -> TableResult<Table> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let first = paths
        .first()
        .ok_or_else(|| TableError::load(None, "no files given to load"))?;
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format(first).map_err(|m| TableError::load(Some(first), m))?,
    };

    let result = match fmt {
        TableFormat::Csv => csv::load_csv(&paths, effective_delimiter(first, options.delimiter)),
        TableFormat::Snapshot => snapshot::load_snapshot(&paths),
        TableFormat::Text => Err(TableError::load(
            Some(first),
            "the text rendering is write-only and cannot be loaded",
        )),
    };

    let files = paths.len();
    let ctx = IoContext {
        paths,
        format: fmt,
        direction: IoDirection::Load,
    };
    report(
        options.observer.as_deref(),
        options.alert_at_or_above,
        &ctx,
        result.as_ref().map(|t| IoStats {
            rows: t.row_count(),
            files,
        }),
    );

    result
}

/// Save `table` to `path`.
///
/// - If `options.format` is `None`, the format is inferred from the path's extension.
/// - CSV and snapshot saves honor `options.max_rows` (see [`crate::io::part_path`]).
///
/// Observer reporting works as in [`load`].
///
/// Returns the written paths.
///
/// # Examples
///
/// ```no_run
/// use table_processing::io::{save, SaveOptions};
/// use table_processing::types::{Table, Value};
///
/// # fn main() -> Result<(), table_processing::TableError> {
/// let table = Table::new(
///     vec!["id".to_string()],
///     (1..=5).map(|i| vec![Value::Int64(i)]).collect(),
/// );
/// let opts = SaveOptions {
///     max_rows: Some(2),
///     ..Default::default()
/// };
/// // Writes ids_part1.csv, ids_part2.csv, ids_part3.csv.
/// let written = save(&table, "ids.csv", &opts)?;
/// assert_eq!(written.len(), 3);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`TableError::Save`] if the format cannot be inferred or the format-specific writer fails.
pub fn save(table: &Table, path: impl AsRef<Path>, options: &SaveOptions) -> TableResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format(path).map_err(|m| TableError::save(Some(path), m))?,
    };

    let result = match fmt {
        TableFormat::Csv => csv::save_csv(
            table,
            path,
            options.max_rows,
            effective_delimiter(path, options.delimiter),
        ),
        TableFormat::Snapshot => snapshot::save_snapshot(table, path, options.max_rows),
        TableFormat::Text => text::save_text(table, path),
    };

    let ctx = IoContext {
        paths: vec![path.to_path_buf()],
        format: fmt,
        direction: IoDirection::Save,
    };
    report(
        options.observer.as_deref(),
        options.alert_at_or_above,
        &ctx,
        result.as_ref().map(|written| IoStats {
            rows: table.row_count(),
            files: written.len(),
        }),
    );

    result
}

fn report(
    observer: Option<&dyn IoObserver>,
    alert_at_or_above: IoSeverity,
    ctx: &IoContext,
    outcome: Result<IoStats, &TableError>,
) {
    let Some(obs) = observer else {
        return;
    };
    match outcome {
        Ok(stats) => obs.on_success(ctx, stats),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &TableError) -> IoSeverity {
    if e.is_io() {
        IoSeverity::Critical
    } else {
        IoSeverity::Error
    }
}

fn effective_delimiter(path: &Path, delimiter: u8) -> u8 {
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    if is_tsv && delimiter == DEFAULT_DELIMITER {
        b'\t'
    } else {
        delimiter
    }
}

fn infer_format(path: &Path) -> Result<TableFormat, String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("cannot infer format: path has no extension ({})", path.display()))?;

    TableFormat::from_extension(ext)
        .ok_or_else(|| format!("cannot infer format from extension '{ext}' for path ({})", path.display()))
}
