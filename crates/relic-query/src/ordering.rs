//! Multi-key sorting.
//!
//! Provides [`Direction`] for sort direction, [`SortKey`] for field-based
//! ordering and [`sort_items`] to sort records by a list of keys.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::path::resolve;
use crate::record::Record;
use crate::value::Value;

/// An undefined sort value is placed before every defined value, whatever
/// the key's direction. Two undefined values tie.
pub const UNDEFINED_SORTS_FIRST: bool = true;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Direction {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Direction::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the wire name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort key: a field path and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field path to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending key for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Direction::Asc)
    }

    /// Creates a descending key for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Direction::Desc)
    }

    /// Creates a key with the given direction.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        SortKey {
            field: field.into(),
            direction,
        }
    }

    /// Compares two records on this key alone.
    ///
    /// Undefined values are placed first without applying the direction.
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let val_a = resolve(a, &self.field);
        let val_b = resolve(b, &self.field);

        match (val_a.is_undefined(), val_b.is_undefined()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.direction.apply(compare_values(&val_a, &val_b)),
        }
    }
}

/// An ordered list of sort keys; earlier keys take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates an empty sort spec, which leaves order unchanged.
    pub fn new() -> Self {
        SortSpec::default()
    }

    /// Appends a key.
    pub fn then(mut self, key: SortKey) -> Self {
        self.keys.push(key);
        self
    }

    /// Returns the keys in precedence order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parses a sort spec from JSON.
    ///
    /// Returns [`QueryError::InvalidSortSpec`] if `json` is not an array.
    ///
    /// ```
    /// use relic_query::{QueryError, SortSpec};
    /// use serde_json::json;
    ///
    /// let spec = SortSpec::from_json(&json!([{ "field": "price", "direction": "desc" }])).unwrap();
    /// assert_eq!(spec.keys().len(), 1);
    ///
    /// let err = SortSpec::from_json(&json!({ "field": "price" })).unwrap_err();
    /// assert!(matches!(err, QueryError::InvalidSortSpec("object")));
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Result<SortSpec> {
        if !json.is_array() {
            return Err(QueryError::InvalidSortSpec(json_type_name(json)));
        }
        Ok(serde_json::from_value(json.clone())?)
    }
}

impl From<Vec<SortKey>> for SortSpec {
    fn from(keys: Vec<SortKey>) -> Self {
        SortSpec { keys }
    }
}

impl FromIterator<SortKey> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        SortSpec {
            keys: iter.into_iter().collect(),
        }
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Position of a value kind when kinds differ.
fn type_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Undefined => 0,
        Value::Null => 1,
        Value::Bool(_) => 2,
        Value::Number(_) => 3,
        Value::Date(_) => 4,
        Value::String(_) => 5,
        Value::Array(_) => 6,
        Value::Record(_) => 7,
    }
}

/// Ascending comparison of two defined sort values.
///
/// - Arrays compare by length.
/// - Numbers compare numerically with `NaN` last; invalid dates sort first.
/// - Values of different kinds compare by a fixed kind rank: null, booleans,
///   numbers, dates, strings, arrays, records.
///
/// The result is a total order, so it is safe to hand to `sort_by`.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Array(a), Value::Array(b)) => a.len().cmp(&b.len()),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compares two records key by key; the first non-equal key decides.
pub fn compare_records<R: Record + ?Sized>(a: &R, b: &R, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = key.compare(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sorts records in place by `keys`.
///
/// The sort is stable: records that tie on every key keep their relative
/// order. An empty key list leaves the slice untouched.
///
/// # Example
///
/// ```
/// use relic_query::{sort_items, SortKey};
/// use serde_json::json;
///
/// let mut items = vec![
///     json!({ "name": "b", "price": 5 }),
///     json!({ "name": "a", "price": 5 }),
///     json!({ "name": "c", "price": 1 }),
/// ];
/// sort_items(&[SortKey::desc("price"), SortKey::asc("name")], &mut items);
///
/// let names: Vec<_> = items.iter().map(|item| item["name"].as_str().unwrap()).collect();
/// assert_eq!(names, ["a", "b", "c"]);
/// ```
pub fn sort_items<T: Record>(keys: &[SortKey], items: &mut [T]) {
    if keys.is_empty() {
        return;
    }
    items.sort_by(|a, b| compare_records(a, b, keys));
    debug!(items = items.len(), keys = keys.len(), "sorted items");
}
