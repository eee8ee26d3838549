//! Dot-delimited field path resolution.
//!
//! `"seller.name"` descends into the nested `seller` record. Descending
//! through an array maps the remaining path over every item, so
//! `"attributes.name"` on a record with a list of attributes yields the list
//! of attribute names.

use crate::record::Record;
use crate::value::Value;

/// Resolves a dotted field path against a record.
///
/// - A path without `.` reads the field directly.
/// - A falsy intermediate value (missing, null, `0`, `""`, `false`) stops
///   the descent and is returned as-is.
/// - A truthy scalar in the middle of a path resolves to `Undefined`.
///
/// Resolution never fails.
///
/// # Example
///
/// ```
/// use relic_query::{resolve, Value};
/// use serde_json::json;
///
/// let riven = json!({
///     "weapon": { "name": "Rubico" },
///     "attributes": [{ "name": "crit" }, { "name": "damage" }],
/// });
///
/// assert_eq!(resolve(&riven, "weapon.name"), Value::from("Rubico"));
/// assert_eq!(
///     resolve(&riven, "attributes.name"),
///     Value::Array(vec![Value::from("crit"), Value::from("damage")]),
/// );
/// ```
pub fn resolve<'a, R: Record + ?Sized>(record: &'a R, path: &str) -> Value<'a> {
    match path.split_once('.') {
        None => record.field(path),
        Some((head, rest)) => descend(record.field(head), rest),
    }
}

fn descend<'a>(value: Value<'a>, rest: &str) -> Value<'a> {
    if !value.is_truthy() {
        return value;
    }
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| descend(item, rest)).collect())
        }
        Value::Record(record) => resolve(record, rest),
        _ => Value::Undefined,
    }
}
