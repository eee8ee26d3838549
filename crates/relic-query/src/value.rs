//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the value of a field resolved from a record.
//! Records are arbitrarily shaped, so the value model mirrors a loosely typed
//! document: absent and null values, scalars, dates, arrays and nested records.
//!
//! Conversions follow the loose rules list views rely on: truthiness, string
//! and number conversion, and relational comparison behave the way dynamic
//! record data is expected to behave in the UI layer that feeds this engine.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::record::Record;

/// Runtime value for comparison, usually borrowed from the source record.
///
/// # Example
///
/// ```
/// use relic_query::{Number, Value};
///
/// let price = Value::from(20i64);
/// assert_eq!(price.as_number(), Some(Number::I64(20)));
/// assert!(price.is_truthy());
/// assert!(!Value::from("").is_truthy());
/// ```
#[derive(Clone)]
pub enum Value<'a> {
    /// Field not present on the record.
    Undefined,
    /// Field present but explicitly null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, borrowed where possible.
    String(Cow<'a, str>),
    /// Date value; `None` is an invalid date.
    Date(Option<Timestamp>),
    /// Array of values.
    Array(Vec<Value<'a>>),
    /// Nested record, resolved further by dotted paths.
    Record(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is an `Undefined` value.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Null` and `Undefined`, the values that compare
    /// loosely equal to null.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Returns `true` if this is an `Array` value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Truthiness: `false`, `0`, `NaN`, the empty string, null and undefined
    /// are falsy; everything else, including empty arrays, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => {
                let f = n.to_f64();
                f != 0.0 && !f.is_nan()
            }
            Value::String(s) => !s.is_empty(),
            Value::Date(_) | Value::Array(_) | Value::Record(_) => true,
        }
    }

    /// Returns the name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Record(_) => "object",
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the array items, if present.
    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the date, if this is a valid date.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Date(ts) => *ts,
            _ => None,
        }
    }

    /// Converts the value to its string form.
    ///
    /// Arrays join their items with `,` (null items become empty), nested
    /// records render as `[object Object]` and dates use ISO-8601 UTC.
    pub fn to_js_string(&self) -> Cow<'_, str> {
        match self {
            Value::Undefined => Cow::Borrowed("undefined"),
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::String(s) => Cow::Borrowed(s.as_ref()),
            Value::Date(Some(ts)) => Cow::Owned(ts.to_iso_string()),
            Value::Date(None) => Cow::Borrowed("Invalid Date"),
            Value::Array(items) => {
                let parts: Vec<Cow<'_, str>> = items
                    .iter()
                    .map(|item| {
                        if item.is_nullish() {
                            Cow::Borrowed("")
                        } else {
                            item.to_js_string()
                        }
                    })
                    .collect();
                Cow::Owned(parts.join(","))
            }
            Value::Record(_) => Cow::Borrowed("[object Object]"),
        }
    }

    /// Converts the value to a number. Unconvertible values become `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.to_f64(),
            Value::String(s) => parse_number(s),
            Value::Date(Some(ts)) => ts.as_millis() as f64,
            Value::Date(None) => f64::NAN,
            Value::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => parse_number(&single.to_js_string()),
                _ => f64::NAN,
            },
            Value::Record(_) => f64::NAN,
        }
    }

    /// Converts the value to a timestamp. Numbers are epoch milliseconds and
    /// strings are parsed as ISO-8601 dates; anything else is invalid.
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Undefined => None,
            Value::Null => Some(Timestamp(0)),
            Value::Bool(b) => Some(Timestamp(i64::from(*b))),
            Value::Number(n) => {
                let millis = n.to_f64();
                millis.is_finite().then(|| Timestamp(millis.trunc() as i64))
            }
            Value::String(s) => Timestamp::parse(s),
            Value::Date(ts) => *ts,
            Value::Array(_) | Value::Record(_) => Timestamp::parse(&self.to_js_string()),
        }
    }

    /// Lower-cases strings and the string items of arrays. Other values are
    /// returned unchanged.
    pub fn to_lowercase(self) -> Value<'a> {
        match self {
            Value::String(s) => Value::String(Cow::Owned(s.to_lowercase())),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(_) => item.to_lowercase(),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    /// Strict equality between two values of the same kind.
    ///
    /// Numbers compare numerically across representations, dates by instant
    /// and arrays item by item. Values of different kinds are never equal.
    pub fn same_value(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(Some(a)), Value::Date(Some(b))) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_value(y))
            }
            (Value::Record(a), Value::Record(b)) => same_record(*a, *b),
            _ => false,
        }
    }

    /// Relational comparison as used by `<`, `>` and friends.
    ///
    /// Two string-like values (strings, arrays, records) compare by their
    /// string forms; every other pairing compares numerically. Returns `None`
    /// when either side is `NaN`.
    pub fn loose_cmp(&self, other: &Value<'_>) -> Option<Ordering> {
        if self.is_string_like() && other.is_string_like() {
            return Some(self.to_js_string().cmp(&other.to_js_string()));
        }
        self.to_number().partial_cmp(&other.to_number())
    }

    fn is_string_like(&self) -> bool {
        matches!(self, Value::String(_) | Value::Array(_) | Value::Record(_))
    }
}

fn same_record(a: &dyn Record, b: &dyn Record) -> bool {
    std::ptr::eq(a as *const _ as *const (), b as *const _ as *const ())
}

/// Parses a string the way loosely typed numeric conversion does: surrounding
/// whitespace is ignored, the empty string is zero, `0x`/`0o`/`0b` prefixes
/// select a radix and anything else unparseable is `NaN`.
fn parse_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    // Rust accepts "inf" and "nan" spellings that must stay NaN here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Date(ts) => f.debug_tuple("Date").field(ts).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Record(_) => f.write_str("Record(..)"),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => same_record(*a, *b),
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(ts: Timestamp) -> Self {
        Value::Date(Some(ts))
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'a> From<&'a serde_json::Value> for Value<'a> {
    fn from(json: &'a serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(Cow::Borrowed(s.as_str())),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(_) => Value::Record(json),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are handled by converting
/// to the appropriate common type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types. `None` when either is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Total ordering used for sorting; NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            _ => {
                let (a, b) = (self.to_f64(), other.to_f64());
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                }
            }
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() && *n > 0.0 => f.write_str("Infinity"),
            Number::F64(n) if n.is_infinite() => f.write_str("-Infinity"),
            Number::F64(n) if *n == 0.0 => f.write_str("0"),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// # Example
///
/// ```
/// use relic_query::Timestamp;
///
/// let ts = Timestamp::parse("2024-01-29").unwrap();
/// assert_eq!(ts.to_iso_string(), "2024-01-29T00:00:00.000Z");
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

/// Date-time layouts accepted without an explicit offset; read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }

    /// Parses an RFC 3339 date-time, a date-time without offset (read as
    /// UTC) or a bare `YYYY-MM-DD` date (UTC midnight).
    pub fn parse(input: &str) -> Option<Timestamp> {
        let s = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Timestamp(ndt.and_utc().timestamp_millis()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|ndt| Timestamp(ndt.and_utc().timestamp_millis()))
    }

    /// Converts to a UTC date-time, if in chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    /// Formats as ISO-8601 with millisecond precision, e.g.
    /// `2024-01-29T00:00:00.000Z`.
    pub fn to_iso_string(self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => "Invalid Date".to_string(),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0i64).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::from(true).is_truthy());
        assert!(Value::from(-1i64).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
        assert!(Value::Date(None).is_truthy());
    }

    #[test]
    fn string_forms() {
        assert_eq!(Value::from(5i64).to_js_string(), "5");
        assert_eq!(Value::from(5.0f64).to_js_string(), "5");
        assert_eq!(Value::from(2.5f64).to_js_string(), "2.5");
        assert_eq!(Value::from(f64::NAN).to_js_string(), "NaN");
        assert_eq!(Value::from(true).to_js_string(), "true");
        assert_eq!(
            Value::Array(vec![Value::from(1i64), Value::Null, Value::from("x")]).to_js_string(),
            "1,,x"
        );
        assert_eq!(Value::Date(Some(Timestamp(0))).to_js_string(), "1970-01-01T00:00:00.000Z");
        assert_eq!(Value::Date(None).to_js_string(), "Invalid Date");
    }

    #[test]
    fn number_conversion() {
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x10").to_number(), 16.0);
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert!(Value::from("12abc").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Array(vec![]).to_number(), 0.0);
        assert_eq!(Value::Array(vec![Value::from("7")]).to_number(), 7.0);
        assert!(Value::Array(vec![Value::from(1i64), Value::from(2i64)])
            .to_number()
            .is_nan());
    }

    #[test]
    fn timestamp_conversion() {
        assert_eq!(Value::from(1500i64).to_timestamp(), Some(Timestamp(1500)));
        assert_eq!(
            Value::from("1970-01-01T00:00:01Z").to_timestamp(),
            Some(Timestamp(1000))
        );
        assert_eq!(
            Value::from("1970-01-02").to_timestamp(),
            Some(Timestamp(86_400_000))
        );
        assert_eq!(
            Value::from("1970-01-01T00:00:02").to_timestamp(),
            Some(Timestamp(2000))
        );
        assert_eq!(Value::from("not a date").to_timestamp(), None);
        assert_eq!(Value::from(f64::NAN).to_timestamp(), None);
    }

    #[test]
    fn lowercase_applies_to_strings_and_string_items() {
        assert_eq!(Value::from("Riven").to_lowercase(), Value::from("riven"));
        assert_eq!(
            Value::Array(vec![Value::from("Prime"), Value::from(3i64)]).to_lowercase(),
            Value::Array(vec![Value::from("prime"), Value::from(3i64)])
        );
        assert_eq!(Value::from(3i64).to_lowercase(), Value::from(3i64));
    }

    #[test]
    fn same_value_crosses_number_representations() {
        assert!(Value::from(10i64).same_value(&Value::from(10.0f64)));
        assert!(Value::from(10u64).same_value(&Value::from(10i64)));
        assert!(!Value::from(10i64).same_value(&Value::from("10")));
        assert!(!Value::from(f64::NAN).same_value(&Value::from(f64::NAN)));
        assert!(Value::Null.same_value(&Value::Null));
        assert!(!Value::Null.same_value(&Value::Undefined));
    }

    #[test]
    fn loose_cmp_rules() {
        assert_eq!(
            Value::from("apple").loose_cmp(&Value::from("banana")),
            Some(Ordering::Less)
        );
        // Mixed string/number pairs compare numerically.
        assert_eq!(
            Value::from("10").loose_cmp(&Value::from(9i64)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("abc").loose_cmp(&Value::from(1i64)), None);
        assert_eq!(
            Value::Date(Some(Timestamp(5))).loose_cmp(&Value::from(4i64)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_total_cmp_places_nan_last() {
        assert_eq!(
            Number::F64(f64::NAN).total_cmp(Number::I64(1)),
            Ordering::Greater
        );
        assert_eq!(
            Number::I64(1).total_cmp(Number::F64(f64::NAN)),
            Ordering::Less
        );
        assert_eq!(Number::I64(-3).total_cmp(Number::U64(2)), Ordering::Less);
    }

    #[test]
    fn json_numbers_keep_their_representation() {
        let json = serde_json::json!([1, -1, 1.5, u64::MAX]);
        let items: Vec<Value<'_>> = json
            .as_array()
            .map(|items| items.iter().map(Value::from).collect())
            .unwrap_or_default();
        assert_eq!(items[0], Value::Number(Number::I64(1)));
        assert_eq!(items[1], Value::Number(Number::I64(-1)));
        assert_eq!(items[2], Value::Number(Number::F64(1.5)));
        assert_eq!(items[3], Value::Number(Number::U64(u64::MAX)));
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);
        assert_eq!(Timestamp(86_400_000).to_iso_string(), "1970-01-02T00:00:00.000Z");
    }
}
