//! Declared value types and coercion.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Number, Value};

/// How a resolved value is converted before operators run.
///
/// Set with the `type` key of a condition map. Without it values are
/// compared as they come out of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorType {
    /// Convert to the value's string form.
    String,
    /// Convert to a number; unconvertible values become `NaN`.
    Number,
    /// Convert to the value's truthiness.
    Boolean,
    /// Convert to a date; numbers are epoch milliseconds.
    Date,
    /// Compare as-is.
    Array,
    /// Compare as-is.
    Object,
    /// Compare as-is.
    Any,
}

impl OperatorType {
    /// Converts `value` to this type. `Null` and `Undefined` are never
    /// converted.
    ///
    /// ```
    /// use relic_query::{OperatorType, Value};
    ///
    /// assert_eq!(OperatorType::String.coerce(Value::from(42i64)), Value::from("42"));
    /// assert_eq!(OperatorType::Number.coerce(Value::from("7")), Value::from(7.0f64));
    /// assert_eq!(OperatorType::Number.coerce(Value::Null), Value::Null);
    /// ```
    pub fn coerce<'a>(self, value: Value<'a>) -> Value<'a> {
        if value.is_nullish() {
            return value;
        }
        match self {
            OperatorType::String => match value {
                Value::String(_) => value,
                other => Value::String(Cow::Owned(other.to_js_string().into_owned())),
            },
            OperatorType::Number => Value::Number(Number::F64(value.to_number())),
            OperatorType::Boolean => Value::Bool(value.is_truthy()),
            OperatorType::Date => Value::Date(value.to_timestamp()),
            OperatorType::Array | OperatorType::Object | OperatorType::Any => value,
        }
    }

    /// Returns the wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorType::String => "string",
            OperatorType::Number => "number",
            OperatorType::Boolean => "boolean",
            OperatorType::Date => "date",
            OperatorType::Array => "array",
            OperatorType::Object => "object",
            OperatorType::Any => "any",
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Applies an optional declared type; `None` leaves the value untouched.
pub fn coerce<'a>(value: Value<'a>, value_type: Option<OperatorType>) -> Value<'a> {
    match value_type {
        Some(ty) => ty.coerce(value),
        None => value,
    }
}
