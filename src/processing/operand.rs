//! Right-hand operands for arithmetic and comparison.

use crate::column::ColumnRef;
use crate::error::TableResult;
use crate::processor::TableProcessor;
use crate::types::Value;

/// The second operand of a column operation.
///
/// The caller states whether a value names a column or is a literal: `Operand::scalar(1)` is
/// always the number one, even in a table with a column at position 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Use the (coerced) values of another column, row by row.
    Column(ColumnRef),
    /// Broadcast one value across every row.
    Scalar(Value),
}

impl Operand {
    /// Column operand by position or name.
    pub fn column(column: impl Into<ColumnRef>) -> Self {
        Self::Column(column.into())
    }

    /// Literal operand.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<ColumnRef> for Operand {
    fn from(c: ColumnRef) -> Self {
        Self::Column(c)
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Self::Scalar(v)
    }
}

impl TableProcessor {
    /// Row-aligned values of `operand`.
    pub(crate) fn operand_values(&self, operand: &Operand) -> TableResult<Vec<Value>> {
        match operand {
            Operand::Column(c) => self.get_values(c),
            Operand::Scalar(v) => Ok(vec![v.clone(); self.table().row_count()]),
        }
    }
}
