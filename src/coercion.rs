//! Conversion of stored values to a column's declared [`DataType`].
//!
//! Two entry points with different failure contracts:
//!
//! - [`DataType::coerce`] is strict and used when writing: a value that cannot be represented
//!   in the target type is an error.
//! - [`DataType::coerce_lenient`] is used when reading: a value that cannot be converted is
//!   returned unchanged.
//!
//! [`Value::Null`] converts to [`Value::Null`] for every target type.

use thiserror::Error;

use crate::types::{DataType, Value};

/// A value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {value:?} to {target}: {reason}")]
pub struct CoercionError {
    /// The value that failed to convert.
    pub value: Value,
    /// Requested type.
    pub target: DataType,
    /// Short description of the failure.
    pub reason: String,
}

impl DataType {
    /// Convert `value` to this type, failing if it cannot be represented.
    ///
    /// - `Int64`: floats are truncated toward zero, booleans become 0/1, text is parsed.
    /// - `Float64`: integers are widened, booleans become 0.0/1.0, text is parsed.
    /// - `Bool`: non-zero numbers are `true`, text must be `true`/`false` (any case).
    /// - `Utf8`: the display form of the value.
    ///
    /// Text is trimmed before parsing.
    pub fn coerce(self, value: &Value) -> Result<Value, CoercionError> {
        let fail = |reason: &str| CoercionError {
            value: value.clone(),
            target: self,
            reason: reason.to_owned(),
        };

        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),

            (Self::Int64, Value::Int64(v)) => Ok(Value::Int64(*v)),
            (Self::Int64, Value::Float64(v)) => {
                let t = v.trunc();
                // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
                if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
                    Ok(Value::Int64(t as i64))
                } else {
                    Err(fail("float out of integer range"))
                }
            }
            (Self::Int64, Value::Bool(b)) => Ok(Value::Int64(i64::from(*b))),
            (Self::Int64, Value::Utf8(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| fail(&e.to_string())),

            (Self::Float64, Value::Int64(v)) => Ok(Value::Float64(*v as f64)),
            (Self::Float64, Value::Float64(v)) => Ok(Value::Float64(*v)),
            (Self::Float64, Value::Bool(b)) => Ok(Value::Float64(if *b { 1.0 } else { 0.0 })),
            (Self::Float64, Value::Utf8(s)) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| fail(&e.to_string())),

            (Self::Bool, Value::Int64(v)) => Ok(Value::Bool(*v != 0)),
            (Self::Bool, Value::Float64(v)) => Ok(Value::Bool(*v != 0.0)),
            (Self::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
            (Self::Bool, Value::Utf8(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(fail("expected true/false")),
            },

            (Self::Utf8, Value::Utf8(s)) => Ok(Value::Utf8(s.clone())),
            (Self::Utf8, other) => Ok(Value::Utf8(other.to_string())),
        }
    }

    /// Convert `value` to this type, returning it unchanged if the conversion fails.
    pub fn coerce_lenient(self, value: &Value) -> Value {
        self.coerce(value).unwrap_or_else(|_| value.clone())
    }
}
