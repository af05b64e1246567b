//! `table-processing` is a small library for working with in-memory tables: rows of loosely
//! typed [`types::Value`]s under a header of column names, with a declared
//! [`types::DataType`] per column.
//!
//! The primary entrypoint is [`processor::TableProcessor`], which wraps a [`types::Table`] and
//! exposes column access, column arithmetic and comparison, and row selection. Tables are read
//! and written with [`io::load`] / [`io::save`], which pick the file format from the extension
//! (or you can force a format via [`io::LoadOptions`] / [`io::SaveOptions`]).
//!
//! ## Types and coercion
//!
//! Every column may carry a declared type:
//!
//! - [`types::DataType::Int64`]
//! - [`types::DataType::Float64`]
//! - [`types::DataType::Bool`]
//! - [`types::DataType::Utf8`]
//!
//! Types are inferred from the first non-null value of each column when a table is built with
//! [`types::Table::new`]. Reads convert to the declared type best-effort (a value that does
//! not convert is returned as stored); writes convert strictly and fail with
//! [`TableError::Column`]. [`types::Value::Null`] survives every conversion.
//!
//! ## Quick example: arithmetic and comparison
//!
//! ```rust
//! use table_processing::processing::Operand;
//! use table_processing::processor::TableProcessor;
//! use table_processing::types::{DataType, Table, Value};
//!
//! let table = Table::new(
//!     vec!["value".to_string()],
//!     vec![vec![Value::Int64(10)], vec![Value::Int64(20)], vec![Value::Int64(30)]],
//! );
//! let mut p = TableProcessor::new(table);
//!
//! p.mul("value", Operand::scalar(2)).unwrap();
//! assert_eq!(
//!     p.get_values("value").unwrap(),
//!     vec![Value::Int64(20), Value::Int64(40), Value::Int64(60)]
//! );
//! assert_eq!(p.column_types().get(0), Some(DataType::Int64));
//!
//! // Division always produces floats, written into a new column by name.
//! let mut p = TableProcessor::new(Table::new(
//!     vec!["a".to_string(), "half".to_string()],
//!     vec![vec![Value::Int64(3), Value::Float64(0.0)]],
//! ));
//! p.div_into("a", Operand::scalar(2), "half").unwrap();
//! assert_eq!(p.get_value("half").unwrap(), Value::Float64(1.5));
//!
//! // Comparisons produce a row mask.
//! let mask = p.ge("a", Operand::column("half")).unwrap();
//! assert_eq!(mask, vec![true]);
//! ```
//!
//! ## Selecting rows: copies and views
//!
//! ```rust
//! use table_processing::processing::Operand;
//! use table_processing::processor::TableProcessor;
//! use table_processing::types::{Table, Value};
//!
//! let p = TableProcessor::new(Table::new(
//!     vec!["score".to_string()],
//!     vec![vec![Value::Int64(10)], vec![Value::Int64(20)], vec![Value::Int64(30)], vec![Value::Int64(40)]],
//! ));
//!
//! let mask = p.gr("score", Operand::scalar(25)).unwrap();
//! assert_eq!(mask, vec![false, false, true, true]);
//!
//! // A copy is independent of its source.
//! let high = p.filter_rows(&mask).unwrap();
//! assert_eq!(high.table().to_rows(), vec![vec![Value::Int64(30)], vec![Value::Int64(40)]]);
//!
//! // A view writes through to its source.
//! let mut first_two = p.view_by_number(0, Some(2)).unwrap();
//! first_two.sub("score", Operand::scalar(10)).unwrap();
//! assert_eq!(p.table().cell(1, 0), Some(Value::Int64(10)));
//! ```
//!
//! ## Loading and saving
//!
//! ```no_run
//! use table_processing::io::{load, save, LoadOptions, SaveOptions};
//!
//! # fn main() -> Result<(), table_processing::TableError> {
//! // `.csv` selects delimited text; headers must agree across files.
//! let table = load(&["part_a.csv", "part_b.csv"], &LoadOptions::default())?;
//!
//! // `.bin` selects the binary snapshot, which keeps declared types exactly.
//! save(&table, "combined.bin", &SaveOptions::default())?;
//!
//! // `.txt` writes the fixed-width rendering (also available via `Display`).
//! save(&table, "combined.txt", &SaveOptions::default())?;
//! println!("{table}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: values, data types, and the [`types::Table`] model
//! - [`column`]: column references and their resolution
//! - [`coercion`]: strict and lenient value conversion
//! - [`processor`]: [`processor::TableProcessor`] and its column access API
//! - [`processing`]: arithmetic, comparison, row selection, and filtering
//! - [`io`]: CSV / binary snapshot / text IO and observers
//! - [`error`]: the shared error type

pub mod coercion;
pub mod column;
pub mod error;
pub mod io;
pub mod processing;
pub mod processor;
pub mod types;

pub use error::{ErrorKind, TableError, TableResult};
