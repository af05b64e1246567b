//! The operation engine: column arithmetic, comparisons, and row selection.
//!
//! Everything here is implemented as methods on [`crate::processor::TableProcessor`]:
//!
//! - [`arithmetic`]: `add`/`sub`/`mul`/`div`, mutating a column in place or into a target
//! - [`compare`]: `eq`/`ne`/`gr`/`ls`/`ge`/`le`, producing a row mask
//! - [`select`]: rows by position range or by first-column key
//! - [`filter`]: rows by mask
//!
//! Selection and filtering come in two forms. The copying methods (`rows_by_number`,
//! `rows_by_index`, `filter_rows`) return an independent [`TableProcessor`]. The view methods
//! (`view_by_number`, `view_by_index`, `filter_view`) return a [`TableView`] whose rows and
//! type map are shared with the source, so writes through either are visible in both.
//!
//! ## Example: compare, filter, update
//!
//! ```rust
//! use table_processing::processing::Operand;
//! use table_processing::processor::TableProcessor;
//! use table_processing::types::{Table, Value};
//!
//! let table = Table::new(
//!     vec!["score".to_string()],
//!     vec![vec![Value::Int64(10)], vec![Value::Int64(20)], vec![Value::Int64(30)]],
//! );
//! let processor = TableProcessor::new(table);
//!
//! let mask = processor.gr("score", Operand::scalar(15)).unwrap();
//! assert_eq!(mask, vec![false, true, true]);
//!
//! let mut high = processor.filter_view(&mask).unwrap();
//! high.add("score", Operand::scalar(1)).unwrap();
//!
//! // The view shares rows with its source.
//! assert_eq!(
//!     processor.get_values("score").unwrap(),
//!     vec![Value::Int64(10), Value::Int64(21), Value::Int64(31)]
//! );
//! ```
//!
//! [`TableProcessor`]: crate::processor::TableProcessor

use thiserror::Error;

use crate::types::Value;

pub mod arithmetic;
pub mod compare;
pub mod filter;
pub mod operand;
pub mod select;

pub use arithmetic::ArithmeticOp;
pub use compare::CompareOp;
pub use operand::Operand;
pub use select::TableView;

/// A single row failed to evaluate.
///
/// Attached as the source of [`crate::error::TableError::Operation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The divisor was zero (integer, float, or `false`).
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow { op: String },

    /// The operands cannot be combined arithmetically (null or text).
    #[error("unsupported operands for {op}: {lhs:?} and {rhs:?}")]
    UnsupportedOperands { op: String, lhs: Value, rhs: Value },

    /// The operands have no ordering (null, or values of different kinds).
    #[error("cannot order {lhs:?} and {rhs:?} for {op}")]
    Unordered { op: String, lhs: Value, rhs: Value },
}

/// Numeric view of a value; booleans count as integers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub(crate) fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Int64(i) => Some(Self::Int(*i)),
            Value::Bool(b) => Some(Self::Int(i64::from(*b))),
            Value::Float64(f) => Some(Self::Float(*f)),
            Value::Null | Value::Utf8(_) => None,
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }
}
