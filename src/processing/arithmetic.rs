//! Column arithmetic: `add`, `sub`, `mul`, `div`.
//!
//! Arithmetic mutates the owning table: results are written to the left column (or an explicit
//! target) through the strict write path of [`TableProcessor::set_values`], and the target's
//! declared type becomes the runtime type of the first result.

use std::fmt;

use super::{EvalError, Num, Operand};
use crate::column::ColumnRef;
use crate::error::{TableError, TableResult};
use crate::processor::TableProcessor;
use crate::types::Value;

/// Supported arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, always producing a float.
    Div,
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        })
    }
}

impl ArithmeticOp {
    /// Apply the operator to two values.
    ///
    /// Booleans count as 0/1. Integer `add`/`sub`/`mul` stay integer and fail on overflow;
    /// any float operand makes the result a float; `div` always yields a float.
    ///
    /// # Errors
    ///
    /// [`EvalError::DivisionByZero`], [`EvalError::Overflow`], or
    /// [`EvalError::UnsupportedOperands`] for null or text operands.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        let (Some(a), Some(b)) = (Num::from_value(lhs), Num::from_value(rhs)) else {
            return Err(EvalError::UnsupportedOperands {
                op: self.to_string(),
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            });
        };

        if self == Self::Div && b.is_zero() {
            return Err(EvalError::DivisionByZero);
        }

        let out = match (self, a, b) {
            (Self::Div, a, b) => Value::Float64(a.as_f64() / b.as_f64()),
            (op, Num::Int(x), Num::Int(y)) => {
                let r = match op {
                    Self::Add => x.checked_add(y),
                    Self::Sub => x.checked_sub(y),
                    _ => x.checked_mul(y),
                };
                Value::Int64(r.ok_or(EvalError::Overflow { op: op.to_string() })?)
            }
            (op, a, b) => {
                let (x, y) = (a.as_f64(), b.as_f64());
                Value::Float64(match op {
                    Self::Add => x + y,
                    Self::Sub => x - y,
                    _ => x * y,
                })
            }
        };
        Ok(out)
    }
}

impl TableProcessor {
    /// Evaluate `column <op> rhs` row by row and store the results.
    ///
    /// Results go to `target` if given, otherwise back into `column`. Nothing is written if
    /// any row fails, so a zero divisor anywhere leaves the table unchanged. A zero scalar
    /// divisor fails even when the table has no rows.
    ///
    /// # Errors
    ///
    /// - [`TableError::Column`] if a column reference does not resolve or the results cannot
    ///   be stored in the target's declared type.
    /// - [`TableError::Operation`] if `column` is not int/float/bool typed, or any row fails
    ///   to evaluate (the [`EvalError`] is attached as the source).
    pub fn arithmetic(
        &mut self,
        op: ArithmeticOp,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
        target: Option<ColumnRef>,
    ) -> TableResult<&mut Self> {
        let column = column.into();
        let rhs = rhs.into();
        let idx = self.column_index(&column)?;
        if let Operand::Scalar(divisor) = &rhs {
            if op == ArithmeticOp::Div && Num::from_value(divisor).is_some_and(Num::is_zero) {
                return Err(TableError::Operation {
                    message: format!("{op} of column {column} by {divisor}"),
                    cause: Some(EvalError::DivisionByZero),
                });
            }
        }
        let lhs_values = self.values_at(idx);

        let lhs_type = self
            .table()
            .declared_type(idx)
            .or_else(|| lhs_values.first().and_then(Value::data_type));
        match lhs_type {
            Some(ty) if ty.is_numeric() => {}
            other => {
                let shown = other.map_or_else(|| "unknown".to_string(), |t| t.to_string());
                return Err(TableError::operation(format!(
                    "{op} requires an int64, float64 or bool column; column {column} is {shown}"
                )));
            }
        }

        let rhs_values = self.operand_values(&rhs)?;
        let results = lhs_values
            .iter()
            .zip(&rhs_values)
            .enumerate()
            .map(|(row, (a, b))| {
                op.apply(a, b).map_err(|cause| TableError::Operation {
                    message: format!("{op} failed at row {row}: {cause}"),
                    cause: Some(cause),
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        let target_idx = match target {
            Some(t) => self.column_index(t)?,
            None => idx,
        };
        let result_type = results.first().and_then(Value::data_type);
        self.write_values(results, target_idx)?;
        if let Some(ty) = result_type {
            self.table().declare_type(target_idx, ty);
        }
        Ok(self)
    }

    /// `column += rhs`
    pub fn add(&mut self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Add, column, rhs, None)
    }

    /// `column -= rhs`
    pub fn sub(&mut self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Sub, column, rhs, None)
    }

    /// `column *= rhs`
    pub fn mul(&mut self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Mul, column, rhs, None)
    }

    /// `column /= rhs`
    pub fn div(&mut self, column: impl Into<ColumnRef>, rhs: impl Into<Operand>) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Div, column, rhs, None)
    }

    /// `target = column + rhs`
    pub fn add_into(
        &mut self,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
        target: impl Into<ColumnRef>,
    ) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Add, column, rhs, Some(target.into()))
    }

    /// `target = column - rhs`
    pub fn sub_into(
        &mut self,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
        target: impl Into<ColumnRef>,
    ) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Sub, column, rhs, Some(target.into()))
    }

    /// `target = column * rhs`
    pub fn mul_into(
        &mut self,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
        target: impl Into<ColumnRef>,
    ) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Mul, column, rhs, Some(target.into()))
    }

    /// `target = column / rhs`
    pub fn div_into(
        &mut self,
        column: impl Into<ColumnRef>,
        rhs: impl Into<Operand>,
        target: impl Into<ColumnRef>,
    ) -> TableResult<&mut Self> {
        self.arithmetic(ArithmeticOp::Div, column, rhs, Some(target.into()))
    }
}
