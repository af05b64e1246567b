//! Delimited text IO.
//!
//! Files are read without a schema: the first record of the first file is the header, and
//! every other cell is typed by [`parse_cell`]. Column types are then inferred
//! from the parsed values as in [`Table::new`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{TableError, TableResult};
use crate::types::{Row, Table, Value};

use super::write_split;

/// Load one or more delimited files into a single table.
///
/// Rules:
///
/// - The first file supplies the header. An empty first file supplies no columns.
/// - Every later non-empty file must repeat that header exactly; empty files add nothing.
/// - Rows are concatenated in file order and may have any width.
///
/// # Errors
///
/// [`TableError::Load`] if `paths` is empty, a file cannot be read, or headers disagree.
pub fn load_csv<P: AsRef<Path>>(paths: &[P], delimiter: u8) -> TableResult<Table> {
    if paths.is_empty() {
        return Err(TableError::load(None, "no files given to load"));
    }

    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| TableError::load_io(path, format!("failed to open '{}'", path.display()), e))?;
        let mut records = read_records(file, delimiter).map_err(|e| record_error(path, e))?;
        if records.is_empty() {
            continue;
        }

        let header = records.remove(0);
        if i == 0 {
            columns = header;
        } else if columns != header {
            return Err(TableError::load(
                Some(path),
                format!(
                    "column mismatch in '{}': expected {columns:?}, found {header:?}",
                    path.display()
                ),
            ));
        }
        rows.extend(
            records
                .into_iter()
                .map(|record| record.iter().map(|cell| parse_cell(cell)).collect()),
        );
    }

    Ok(Table::new(columns, rows))
}

fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    rdr.records()
        .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
        .collect()
}

fn record_error(path: &Path, err: csv::Error) -> TableError {
    let message = format!("failed to read '{}'", path.display());
    let detail = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => TableError::load_io(path, message, source),
        _ => TableError::load(Some(path), format!("{message}: {detail}")),
    }
}

/// Type one raw cell.
///
/// - empty string: [`Value::Null`]
/// - optional `-` then ASCII digits: [`Value::Int64`] (or [`Value::Float64`] past the `i64`
///   range)
/// - optional `-` then digits with exactly one `.`: [`Value::Float64`]
/// - `true` / `false`, any case: [`Value::Bool`]
/// - anything else: [`Value::Utf8`], unchanged
pub fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    if is_digits(unsigned) {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int64(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float64(f);
        }
    }
    if let Some((whole, frac)) = unsigned.split_once('.') {
        let digits = format!("{whole}{frac}");
        if is_digits(&digits) {
            if let Ok(f) = raw.parse::<f64>() {
                return Value::Float64(f);
            }
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Utf8(raw.to_owned())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Save `table` as a delimited file: the header, then one record per row.
///
/// Null cells are written as empty fields and short rows as short records. With
/// `max_rows`, a table with more rows is split into `<base>_part<N><ext>` files, each with
/// the header.
///
/// Returns the written paths.
///
/// # Errors
///
/// [`TableError::Save`] if the table has neither rows nor columns, `max_rows` is zero, or a
/// file cannot be written.
pub fn save_csv(
    table: &Table,
    path: impl AsRef<Path>,
    max_rows: Option<usize>,
    delimiter: u8,
) -> TableResult<Vec<PathBuf>> {
    write_split(table, path.as_ref(), max_rows, |part, path| {
        write_csv_file(part, path, delimiter)
    })
}

fn write_csv_file(table: &Table, path: &Path, delimiter: u8) -> TableResult<()> {
    let message = || format!("failed to write '{}'", path.display());
    let file = File::create(path).map_err(|e| TableError::save_io(path, message(), e))?;
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .delimiter(delimiter)
        .from_writer(file);

    let write_err = |e: csv::Error| {
        let detail = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(source) => TableError::save_io(path, message(), source),
            _ => TableError::save(Some(path), format!("{}: {detail}", message())),
        }
    };

    wtr.write_record(table.columns()).map_err(&write_err)?;
    for row in table.shared_rows() {
        let row = row.borrow();
        wtr.write_record(row.iter().map(ToString::to_string))
            .map_err(&write_err)?;
    }
    wtr.flush().map_err(|e| TableError::save_io(path, message(), e))
}
