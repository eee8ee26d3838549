//! Typed filter conditions and per-field condition maps.
//!
//! A [`Condition`] pairs an [`Operator`] with an operand of the right shape:
//! a scalar [`Operand`], a [`Range`], a compiled [`Pattern`], or nothing.
//! A [`ConditionMap`] groups the conditions that apply to one field together
//! with the modifiers that shape the compared value.

use std::cmp::Ordering;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::coerce::{coerce, OperatorType};
use crate::error::{QueryError, Result};
use crate::op::Operator;
use crate::options::{FilterOptions, MissingFieldPolicy};
use crate::path::resolve;
use crate::record::Record;
use crate::value::{Number, Timestamp, Value};

/// Separator used by `combineFields` when `combineWith` is not given.
pub const DEFAULT_COMBINE_SEPARATOR: &str = " ";

/// Owned operand stored in a condition.
///
/// Unlike [`Value`], which borrows from records, `Operand` owns its data so
/// it can live in filter definitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Date operand; `None` is an invalid date.
    Date(Option<Timestamp>),
    /// List operand, used by the membership operators.
    List(Vec<Operand>),
}

impl Operand {
    /// Borrows the operand as a [`Value`] for comparison.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Operand::Null => Value::Null,
            Operand::Bool(b) => Value::Bool(*b),
            Operand::Number(n) => Value::Number(*n),
            Operand::String(s) => Value::from(s.as_str()),
            Operand::Date(ts) => Value::Date(*ts),
            Operand::List(items) => Value::Array(items.iter().map(Operand::as_value).collect()),
        }
    }

    /// Returns `true` for the null operand.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }

    /// Builds an operand from JSON. Objects are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Operand> {
        Ok(match json {
            serde_json::Value::Null => Operand::Null,
            serde_json::Value::Bool(b) => Operand::Bool(*b),
            serde_json::Value::Number(n) => Operand::Number(Number::from(n)),
            serde_json::Value::String(s) => Operand::String(s.clone()),
            serde_json::Value::Array(items) => Operand::List(
                items
                    .iter()
                    .map(Operand::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(_) => {
                return Err(QueryError::InvalidCondition(
                    "operands must be scalars or lists, not objects".to_string(),
                ))
            }
        })
    }

    fn to_lowercase(&self) -> Operand {
        match self {
            Operand::String(s) => Operand::String(s.to_lowercase()),
            Operand::List(items) => Operand::List(items.iter().map(Operand::to_lowercase).collect()),
            other => other.clone(),
        }
    }

    fn to_date(&self) -> Operand {
        match self {
            Operand::Null | Operand::Date(_) => self.clone(),
            Operand::List(items) => Operand::List(items.iter().map(Operand::to_date).collect()),
            scalar => Operand::Date(scalar.as_value().to_timestamp()),
        }
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Timestamp> for Operand {
    fn from(ts: Timestamp) -> Self {
        Operand::Date(Some(ts))
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(items: Vec<T>) -> Self {
        Operand::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Operand::Null)
    }
}

macro_rules! operand_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(n: $ty) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Bounds for the range operators, given as `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub min: Operand,
    pub max: Operand,
}

impl Range {
    /// Creates a range from its bounds.
    pub fn new(min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        Range {
            min: min.into(),
            max: max.into(),
        }
    }

    /// `min <= value <= max`.
    fn contains(&self, value: &Value<'_>) -> bool {
        matches!(
            value.loose_cmp(&self.min.as_value()),
            Some(Ordering::Greater | Ordering::Equal)
        ) && matches!(
            value.loose_cmp(&self.max.as_value()),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    /// `value < min || value > max`. Incomparable values are neither.
    fn excludes(&self, value: &Value<'_>) -> bool {
        value.loose_cmp(&self.min.as_value()) == Some(Ordering::Less)
            || value.loose_cmp(&self.max.as_value()) == Some(Ordering::Greater)
    }

    fn map(&self, f: impl Fn(&Operand) -> Operand) -> Range {
        Range {
            min: f(&self.min),
            max: f(&self.max),
        }
    }
}

/// Case-insensitive regular expression used by the pattern operators.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` case-insensitively.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Pattern { regex })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Tests the pattern against a string.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A single operator with its operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals(Operand),
    NotEquals(Operand),
    GreaterThan(Operand),
    GreaterOrEqual(Operand),
    LessThan(Operand),
    LessOrEqual(Operand),
    InArray(Operand),
    NotInArray(Operand),
    Matches(Pattern),
    NotMatches(Pattern),
    IsNull,
    IsNotNull,
    BetweenValues(Range),
    NotBetweenValues(Range),
    IsEmpty,
    IsNotEmpty,
    ContainsValue(Operand),
    DoesNotContain(Operand),
    StartsWith(Operand),
    DoesNotStartWith(Operand),
    EndsWith(Operand),
    DoesNotEndWith(Operand),
    IsStrictlyEmpty,
    IsStrictlyNotEmpty,
    OutsideRange(Range),
}

impl Condition {
    /// Returns the operator of this condition.
    pub fn operator(&self) -> Operator {
        match self {
            Condition::Equals(_) => Operator::Equals,
            Condition::NotEquals(_) => Operator::NotEquals,
            Condition::GreaterThan(_) => Operator::GreaterThan,
            Condition::GreaterOrEqual(_) => Operator::GreaterOrEqual,
            Condition::LessThan(_) => Operator::LessThan,
            Condition::LessOrEqual(_) => Operator::LessOrEqual,
            Condition::InArray(_) => Operator::InArray,
            Condition::NotInArray(_) => Operator::NotInArray,
            Condition::Matches(_) => Operator::Matches,
            Condition::NotMatches(_) => Operator::NotMatches,
            Condition::IsNull => Operator::IsNull,
            Condition::IsNotNull => Operator::IsNotNull,
            Condition::BetweenValues(_) => Operator::BetweenValues,
            Condition::NotBetweenValues(_) => Operator::NotBetweenValues,
            Condition::IsEmpty => Operator::IsEmpty,
            Condition::IsNotEmpty => Operator::IsNotEmpty,
            Condition::ContainsValue(_) => Operator::ContainsValue,
            Condition::DoesNotContain(_) => Operator::DoesNotContain,
            Condition::StartsWith(_) => Operator::StartsWith,
            Condition::DoesNotStartWith(_) => Operator::DoesNotStartWith,
            Condition::EndsWith(_) => Operator::EndsWith,
            Condition::DoesNotEndWith(_) => Operator::DoesNotEndWith,
            Condition::IsStrictlyEmpty => Operator::IsStrictlyEmpty,
            Condition::IsStrictlyNotEmpty => Operator::IsStrictlyNotEmpty,
            Condition::OutsideRange(_) => Operator::OutsideRange,
        }
    }

    /// Builds a condition from an operator and its JSON operand.
    ///
    /// Range operators require a two-item array, pattern operators compile
    /// the operand's string form, and the null/emptiness operators ignore
    /// their operand.
    pub fn from_json(op: Operator, operand: &serde_json::Value) -> Result<Condition> {
        if op.is_unary() {
            return Ok(match op {
                Operator::IsNull => Condition::IsNull,
                Operator::IsNotNull => Condition::IsNotNull,
                Operator::IsEmpty => Condition::IsEmpty,
                Operator::IsNotEmpty => Condition::IsNotEmpty,
                Operator::IsStrictlyEmpty => Condition::IsStrictlyEmpty,
                _ => Condition::IsStrictlyNotEmpty,
            });
        }

        if op.is_range_op() {
            let range = match operand.as_array().map(Vec::as_slice) {
                Some([min, max]) => Range {
                    min: Operand::from_json(min)?,
                    max: Operand::from_json(max)?,
                },
                _ => {
                    return Err(QueryError::InvalidCondition(format!(
                        "{} expects a [min, max] operand",
                        op
                    )))
                }
            };
            return Ok(match op {
                Operator::BetweenValues => Condition::BetweenValues(range),
                Operator::NotBetweenValues => Condition::NotBetweenValues(range),
                _ => Condition::OutsideRange(range),
            });
        }

        let operand = Operand::from_json(operand)?;

        if op.is_pattern_op() {
            let pattern = Pattern::new(&operand.as_value().to_js_string())?;
            return Ok(match op {
                Operator::Matches => Condition::Matches(pattern),
                _ => Condition::NotMatches(pattern),
            });
        }

        Ok(match op {
            Operator::Equals => Condition::Equals(operand),
            Operator::NotEquals => Condition::NotEquals(operand),
            Operator::GreaterThan => Condition::GreaterThan(operand),
            Operator::GreaterOrEqual => Condition::GreaterOrEqual(operand),
            Operator::LessThan => Condition::LessThan(operand),
            Operator::LessOrEqual => Condition::LessOrEqual(operand),
            Operator::InArray => Condition::InArray(operand),
            Operator::NotInArray => Condition::NotInArray(operand),
            Operator::ContainsValue => Condition::ContainsValue(operand),
            Operator::DoesNotContain => Condition::DoesNotContain(operand),
            Operator::StartsWith => Condition::StartsWith(operand),
            Operator::DoesNotStartWith => Condition::DoesNotStartWith(operand),
            Operator::EndsWith => Condition::EndsWith(operand),
            _ => Condition::DoesNotEndWith(operand),
        })
    }

    /// Evaluates this condition against an already coerced value.
    ///
    /// Containment and affix operators fail with
    /// [`QueryError::InvalidOperatorUsage`] when the value is not a string
    /// (or, for containment, an array).
    pub fn evaluate(&self, value: &Value<'_>, options: &FilterOptions) -> Result<bool> {
        let op = self.operator();
        Ok(match self {
            Condition::Equals(operand) => value.same_value(&operand.as_value()),
            Condition::NotEquals(operand) => !value.same_value(&operand.as_value()),
            Condition::GreaterThan(operand) => {
                value.loose_cmp(&operand.as_value()) == Some(Ordering::Greater)
            }
            Condition::GreaterOrEqual(operand) => matches!(
                value.loose_cmp(&operand.as_value()),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Condition::LessThan(operand) => {
                value.loose_cmp(&operand.as_value()) == Some(Ordering::Less)
            }
            Condition::LessOrEqual(operand) => matches!(
                value.loose_cmp(&operand.as_value()),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Condition::InArray(operand) => includes_any(value, operand, op)?,
            Condition::NotInArray(operand) => !includes_any(value, operand, op)?,
            Condition::Matches(pattern) => pattern.is_match(&value.to_js_string()),
            Condition::NotMatches(pattern) => {
                let matched = pattern.is_match(&value.to_js_string());
                if options.negate_not_matches {
                    !matched
                } else {
                    matched
                }
            }
            Condition::IsNull | Condition::IsStrictlyEmpty => value.is_nullish(),
            Condition::IsNotNull | Condition::IsStrictlyNotEmpty => !value.is_nullish(),
            Condition::IsEmpty => is_loosely_empty(value),
            Condition::IsNotEmpty => !is_loosely_empty(value),
            Condition::BetweenValues(range) => range.contains(value),
            Condition::NotBetweenValues(range) | Condition::OutsideRange(range) => {
                range.excludes(value)
            }
            Condition::ContainsValue(operand) => includes(value, &operand.as_value(), op)?,
            Condition::DoesNotContain(operand) => !includes(value, &operand.as_value(), op)?,
            Condition::StartsWith(operand) => affix(value, operand, op, |s, p| s.starts_with(p))?,
            Condition::DoesNotStartWith(operand) => {
                !affix(value, operand, op, |s, p| s.starts_with(p))?
            }
            Condition::EndsWith(operand) => affix(value, operand, op, |s, p| s.ends_with(p))?,
            Condition::DoesNotEndWith(operand) => {
                !affix(value, operand, op, |s, p| s.ends_with(p))?
            }
        })
    }

    /// Result for a missing or null value under
    /// [`MissingFieldPolicy::NullAware`].
    pub fn evaluate_absent(&self, options: &FilterOptions) -> bool {
        match self {
            Condition::IsNull | Condition::IsStrictlyEmpty => true,
            Condition::IsNotNull | Condition::IsStrictlyNotEmpty => false,
            Condition::IsEmpty => false,
            Condition::IsNotEmpty => true,
            Condition::Equals(operand) => operand.is_null(),
            Condition::NotEquals(operand) => !operand.is_null(),
            Condition::NotInArray(_)
            | Condition::DoesNotContain(_)
            | Condition::DoesNotStartWith(_)
            | Condition::DoesNotEndWith(_) => true,
            Condition::NotMatches(_) => options.negate_not_matches,
            _ => false,
        }
    }

    /// Applies `f` to every scalar operand of this condition.
    fn map_operands(&self, f: impl Fn(&Operand) -> Operand) -> Condition {
        match self {
            Condition::Equals(o) => Condition::Equals(f(o)),
            Condition::NotEquals(o) => Condition::NotEquals(f(o)),
            Condition::GreaterThan(o) => Condition::GreaterThan(f(o)),
            Condition::GreaterOrEqual(o) => Condition::GreaterOrEqual(f(o)),
            Condition::LessThan(o) => Condition::LessThan(f(o)),
            Condition::LessOrEqual(o) => Condition::LessOrEqual(f(o)),
            Condition::InArray(o) => Condition::InArray(f(o)),
            Condition::NotInArray(o) => Condition::NotInArray(f(o)),
            Condition::ContainsValue(o) => Condition::ContainsValue(f(o)),
            Condition::DoesNotContain(o) => Condition::DoesNotContain(f(o)),
            Condition::StartsWith(o) => Condition::StartsWith(f(o)),
            Condition::DoesNotStartWith(o) => Condition::DoesNotStartWith(f(o)),
            Condition::EndsWith(o) => Condition::EndsWith(f(o)),
            Condition::DoesNotEndWith(o) => Condition::DoesNotEndWith(f(o)),
            Condition::BetweenValues(r) => Condition::BetweenValues(r.map(f)),
            Condition::NotBetweenValues(r) => Condition::NotBetweenValues(r.map(f)),
            Condition::OutsideRange(r) => Condition::OutsideRange(r.map(f)),
            other => other.clone(),
        }
    }
}

fn invalid_usage(op: Operator, value: &Value<'_>) -> QueryError {
    QueryError::InvalidOperatorUsage {
        op: op.as_str(),
        value_type: value.type_name(),
    }
}

/// Containment test: substring for strings, item equality for arrays.
fn includes(haystack: &Value<'_>, needle: &Value<'_>, op: Operator) -> Result<bool> {
    match haystack {
        Value::String(s) => Ok(s.contains(needle.to_js_string().as_ref())),
        Value::Array(items) => Ok(items.iter().any(|item| item.same_value(needle))),
        other => Err(invalid_usage(op, other)),
    }
}

/// Membership test; a list operand passes when any of its items is included.
fn includes_any(haystack: &Value<'_>, operand: &Operand, op: Operator) -> Result<bool> {
    match operand {
        Operand::List(candidates) => {
            if !matches!(haystack, Value::String(_) | Value::Array(_)) {
                return Err(invalid_usage(op, haystack));
            }
            for candidate in candidates {
                if includes(haystack, &candidate.as_value(), op)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        scalar => includes(haystack, &scalar.as_value(), op),
    }
}

fn affix(
    value: &Value<'_>,
    operand: &Operand,
    op: Operator,
    test: fn(&str, &str) -> bool,
) -> Result<bool> {
    match value {
        Value::String(s) => Ok(test(s, &operand.as_value().to_js_string())),
        other => Err(invalid_usage(op, other)),
    }
}

/// Loose equality with the empty string: `""`, `0`, `false` and arrays whose
/// string form is empty.
fn is_loosely_empty(value: &Value<'_>) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.to_f64() == 0.0,
        Value::Bool(b) => !b,
        Value::Array(_) => value.to_js_string().is_empty(),
        _ => false,
    }
}

/// The conditions that apply to one field, plus value modifiers.
///
/// All conditions must hold for the field to pass. Deserializes from the
/// JSON object shape used by list views:
///
/// ```
/// use relic_query::{ConditionMap, Operator, OperatorType};
///
/// let map: ConditionMap = serde_json::from_str(
///     r#"{ "EQUALS": true, "type": "boolean" }"#,
/// ).unwrap();
/// assert_eq!(map.value_type(), Some(OperatorType::Boolean));
/// assert_eq!(map.conditions()[0].operator(), Operator::Equals);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct ConditionMap {
    raw: Vec<Condition>,
    conditions: Vec<Condition>,
    value_type: Option<OperatorType>,
    case_sensitive: bool,
    combine_fields: Vec<String>,
    combine_with: Option<String>,
}

impl ConditionMap {
    /// Creates an empty condition map, which every present value satisfies.
    pub fn new() -> Self {
        ConditionMap::default()
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Declares the type values are coerced to before comparison.
    pub fn with_type(mut self, value_type: OperatorType) -> Self {
        self.value_type = Some(value_type);
        self.refresh()
    }

    /// Enables or disables case-sensitive comparison (default: disabled).
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self.refresh()
    }

    /// Compares the concatenation of these fields instead of the keyed field.
    pub fn combine_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combine_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the separator used between combined fields.
    pub fn combine_with(mut self, separator: impl Into<String>) -> Self {
        self.combine_with = Some(separator.into());
        self
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Adds a condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.raw.push(condition);
        self.refresh()
    }

    /// Adds an `EQUALS` condition.
    pub fn equals(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::Equals(operand.into()))
    }

    /// Adds a `NOT_EQUALS` condition.
    pub fn not_equals(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::NotEquals(operand.into()))
    }

    /// Adds a `GREATER_THAN` condition.
    pub fn greater_than(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::GreaterThan(operand.into()))
    }

    /// Adds a `GREATER_OR_EQUAL` condition.
    pub fn greater_or_equal(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::GreaterOrEqual(operand.into()))
    }

    /// Adds a `LESS_THAN` condition.
    pub fn less_than(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::LessThan(operand.into()))
    }

    /// Adds a `LESS_OR_EQUAL` condition.
    pub fn less_or_equal(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::LessOrEqual(operand.into()))
    }

    /// Adds an `IN_ARRAY` condition.
    pub fn in_array(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::InArray(operand.into()))
    }

    /// Adds a `NOT_IN_ARRAY` condition.
    pub fn not_in_array(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::NotInArray(operand.into()))
    }

    /// Adds a `MATCHES` condition.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn matches(self, pattern: &str) -> Result<Self> {
        Ok(self.condition(Condition::Matches(Pattern::new(pattern)?)))
    }

    /// Adds a `NOT_MATCHES` condition.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn not_matches(self, pattern: &str) -> Result<Self> {
        Ok(self.condition(Condition::NotMatches(Pattern::new(pattern)?)))
    }

    /// Adds an `IS_NULL` condition.
    pub fn is_null(self) -> Self {
        self.condition(Condition::IsNull)
    }

    /// Adds an `IS_NOT_NULL` condition.
    pub fn is_not_null(self) -> Self {
        self.condition(Condition::IsNotNull)
    }

    /// Adds an inclusive `BETWEEN_VALUES` condition.
    pub fn between_values(self, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.condition(Condition::BetweenValues(Range::new(min, max)))
    }

    /// Adds a `NOT_BETWEEN_VALUES` condition.
    pub fn not_between_values(self, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.condition(Condition::NotBetweenValues(Range::new(min, max)))
    }

    /// Adds an `IS_EMPTY` condition.
    pub fn is_empty(self) -> Self {
        self.condition(Condition::IsEmpty)
    }

    /// Adds an `IS_NOT_EMPTY` condition.
    pub fn is_not_empty(self) -> Self {
        self.condition(Condition::IsNotEmpty)
    }

    /// Adds a `CONTAINS_VALUE` condition.
    pub fn contains_value(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::ContainsValue(operand.into()))
    }

    /// Adds a `DOES_NOT_CONTAIN` condition.
    pub fn does_not_contain(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::DoesNotContain(operand.into()))
    }

    /// Adds a `STARTS_WITH` condition.
    pub fn starts_with(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::StartsWith(operand.into()))
    }

    /// Adds a `DOES_NOT_START_WITH` condition.
    pub fn does_not_start_with(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::DoesNotStartWith(operand.into()))
    }

    /// Adds an `ENDS_WITH` condition.
    pub fn ends_with(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::EndsWith(operand.into()))
    }

    /// Adds a `DOES_NOT_END_WITH` condition.
    pub fn does_not_end_with(self, operand: impl Into<Operand>) -> Self {
        self.condition(Condition::DoesNotEndWith(operand.into()))
    }

    /// Adds an `IS_STRICTLY_EMPTY` condition.
    pub fn is_strictly_empty(self) -> Self {
        self.condition(Condition::IsStrictlyEmpty)
    }

    /// Adds an `IS_STRICTLY_NOT_EMPTY` condition.
    pub fn is_strictly_not_empty(self) -> Self {
        self.condition(Condition::IsStrictlyNotEmpty)
    }

    /// Adds an `OUTSIDE_RANGE` condition.
    pub fn outside_range(self, min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        self.condition(Condition::OutsideRange(Range::new(min, max)))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the conditions as evaluated, with operands already lower-cased
    /// and date-coerced according to the modifiers.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the declared value type, if any.
    pub fn value_type(&self) -> Option<OperatorType> {
        self.value_type
    }

    /// Returns `true` if comparisons are case sensitive.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the combined fields, empty when not combining.
    pub fn combined_fields(&self) -> &[String] {
        &self.combine_fields
    }

    /// Returns the separator placed between combined fields.
    pub fn separator(&self) -> &str {
        self.combine_with
            .as_deref()
            .unwrap_or(DEFAULT_COMBINE_SEPARATOR)
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Tests the field at `path` of `record` against every condition.
    pub fn matches_record<R: Record + ?Sized>(
        &self,
        record: &R,
        path: &str,
        options: &FilterOptions,
    ) -> Result<bool> {
        let value = if self.combine_fields.is_empty() {
            resolve(record, path)
        } else {
            Value::from(self.combined_value(record))
        };

        match options.missing_field {
            MissingFieldPolicy::FailOnFalsy if !value.is_truthy() => return Ok(false),
            MissingFieldPolicy::NullAware if value.is_nullish() => {
                return Ok(self
                    .conditions
                    .iter()
                    .all(|condition| condition.evaluate_absent(options)));
            }
            _ => {}
        }

        let mut value = coerce(value, self.value_type);
        if !self.case_sensitive {
            value = value.to_lowercase();
        }

        for condition in &self.conditions {
            if !condition.evaluate(&value, options)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn combined_value<R: Record + ?Sized>(&self, record: &R) -> String {
        let parts: Vec<String> = self
            .combine_fields
            .iter()
            .map(|path| {
                let value = resolve(record, path);
                if value.is_nullish() {
                    String::new()
                } else {
                    value.to_js_string().into_owned()
                }
            })
            .collect();
        parts.join(self.separator())
    }

    /// Rebuilds the evaluated conditions from the raw ones.
    fn refresh(mut self) -> Self {
        let to_date = self.value_type == Some(OperatorType::Date);
        let lowercase = !self.case_sensitive;
        self.conditions = self
            .raw
            .iter()
            .map(|condition| {
                condition.map_operands(|operand| {
                    let operand = if to_date {
                        operand.to_date()
                    } else {
                        operand.clone()
                    };
                    if lowercase {
                        operand.to_lowercase()
                    } else {
                        operand
                    }
                })
            })
            .collect();
        self
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for ConditionMap {
    type Error = QueryError;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut conditions = ConditionMap::new();
        for (key, value) in &map {
            match key.as_str() {
                "type" => {
                    conditions.value_type = Some(serde_json::from_value(value.clone())?);
                }
                "isCaseSensitive" => {
                    conditions.case_sensitive = value.as_bool().ok_or_else(|| {
                        QueryError::InvalidCondition("isCaseSensitive must be a boolean".into())
                    })?;
                }
                "combineFields" => {
                    conditions.combine_fields = serde_json::from_value(value.clone())?;
                }
                "combineWith" => {
                    conditions.combine_with = Some(serde_json::from_value(value.clone())?);
                }
                other => {
                    let op: Operator = other.parse()?;
                    conditions.raw.push(Condition::from_json(op, value)?);
                }
            }
        }
        Ok(conditions.refresh())
    }
}
