//! Column comparisons producing row masks: `eq`, `ne`, `gr`, `ls`, `ge`, `le`.

use std::cmp::Ordering;
use std::fmt;

use super::{EvalError, Num, Operand};
use crate::column::ColumnRef;
use crate::error::{TableError, TableResult};
use crate::processor::TableProcessor;
use crate::types::Value;

/// Supported comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// `a > b`
    Gt,
    /// `a < b`
    Lt,
    /// `a >= b`
    Ge,
    /// `a <= b`
    Le,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gr",
            Self::Lt => "ls",
            Self::Ge => "ge",
            Self::Le => "le",
        })
    }
}

/// How two values relate, before an operator is applied.
enum Relation {
    /// Same kind; `None` when unordered (NaN).
    Ordered(Option<Ordering>),
    /// Both null.
    BothNull,
    /// Different kinds, or one side null.
    Mismatched,
}

fn relate(lhs: &Value, rhs: &Value) -> Relation {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => Relation::BothNull,
        (Value::Utf8(a), Value::Utf8(b)) => Relation::Ordered(Some(a.cmp(b))),
        _ => match (Num::from_value(lhs), Num::from_value(rhs)) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => Relation::Ordered(Some(a.cmp(&b))),
            (Some(a), Some(b)) => Relation::Ordered(a.as_f64().partial_cmp(&b.as_f64())),
            _ => Relation::Mismatched,
        },
    }
}

impl CompareOp {
    /// Compare two values.
    ///
    /// Booleans count as 0/1 and integers compare with floats numerically; text compares
    /// lexicographically. `eq`/`ne` accept any pair (values of different kinds are never
    /// equal). Ordering operators require both sides to be numbers or both text; a NaN
    /// operand makes them `false`.
    ///
    /// # Errors
    ///
    /// [`EvalError::Unordered`] when an ordering operator meets null or mismatched kinds.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<bool, EvalError> {
        let unordered = || EvalError::Unordered {
            op: self.to_string(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        };

        match relate(lhs, rhs) {
            Relation::BothNull => match self {
                Self::Eq => Ok(true),
                Self::Ne => Ok(false),
                _ => Err(unordered()),
            },
            Relation::Mismatched => match self {
                Self::Eq => Ok(false),
                Self::Ne => Ok(true),
                _ => Err(unordered()),
            },
            Relation::Ordered(None) => Ok(self == Self::Ne),
            Relation::Ordered(Some(ord)) => Ok(match self {
                Self::Eq => ord == Ordering::Equal,
                Self::Ne => ord != Ordering::Equal,
                Self::Gt => ord == Ordering::Greater,
                Self::Lt => ord == Ordering::Less,
                Self::Ge => ord != Ordering::Less,
                Self::Le => ord != Ordering::Greater,
            }),
        }
    }
}

impl TableProcessor {
    /// Compare `column` with `rhs` row by row, producing a mask with one entry per row.
    ///
    /// The table is not modified.
    ///
    /// # Errors
    ///
    /// [`TableError::Column`] if a column reference does not resolve, or
    /// [`TableError::Operation`] if a row cannot be compared.
    pub fn compare(
        &self,
        op: CompareOp,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
    ) -> TableResult<Vec<bool>> {
        let lhs_values = self.get_values(column)?;
        let rhs_values = self.operand_values(&rhs.into())?;
        lhs_values
            .iter()
            .zip(&rhs_values)
            .enumerate()
            .map(|(row, (a, b))| {
                op.apply(a, b).map_err(|cause| TableError::Operation {
                    message: format!("comparison {op} failed at row {row}: {cause}"),
                    cause: Some(cause),
                })
            })
            .collect()
    }

    /// Mask of `column == rhs`.
    pub fn eq(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Eq, column, rhs)
    }

    /// Mask of `column != rhs`.
    pub fn ne(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Ne, column, rhs)
    }

    /// Mask of `column > rhs`.
    pub fn gr(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Gt, column, rhs)
    }

    /// Mask of `column < rhs`.
    pub fn ls(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Lt, column, rhs)
    }

    /// Mask of `column >= rhs`.
    pub fn ge(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Ge, column, rhs)
    }

    /// Mask of `column <= rhs`.
    pub fn le(&self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<Vec<bool>> {
        self.compare(CompareOp::Le, column, rhs)
    }
}
