//! Filter composition.
//!
//! A [`FieldFilter`] maps field paths to [`ConditionMap`]s and passes when
//! every entry passes. [`ComplexFilter`] combines field filters in two flat
//! groups:
//!
//! ```text
//! match = (every AND filter passes, or AND is empty)
//!       ∧ (some OR filter passes, or OR is empty)
//! ```
//!
//! [`FilterNode`] is the nested form for callers that need more than two
//! groups. Every `ComplexFilter` converts into an equivalent node.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::condition::ConditionMap;
use crate::error::Result;
use crate::options::FilterOptions;
use crate::record::Record;

/// Predicate over records, evaluated under [`FilterOptions`].
pub trait RecordFilter {
    /// Tests one record.
    ///
    /// Returns an error if an operator is applied to a value it does not
    /// support.
    fn matches<R: Record + ?Sized>(&self, record: &R, options: &FilterOptions) -> Result<bool>;
}

/// Conditions keyed by field path. All entries must pass.
///
/// # Example
///
/// ```
/// use relic_query::{ConditionMap, FieldFilter, FilterOptions, RecordFilter};
/// use serde_json::json;
///
/// let filter = FieldFilter::new()
///     .field("price", ConditionMap::new().less_than(20))
///     .field("name", ConditionMap::new().starts_with("arcane"));
///
/// let listing = json!({ "name": "Arcane Energize", "price": 15 });
/// assert!(filter.matches(&listing, &FilterOptions::default()).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldFilter {
    entries: BTreeMap<String, ConditionMap>,
}

impl FieldFilter {
    /// Creates an empty field filter, which every record passes.
    pub fn new() -> Self {
        FieldFilter::default()
    }

    /// Adds (or replaces) the conditions for a field path.
    pub fn field(mut self, path: impl Into<String>, conditions: ConditionMap) -> Self {
        self.entries.insert(path.into(), conditions);
        self
    }

    /// Returns the conditions for a field path.
    pub fn get(&self, path: &str) -> Option<&ConditionMap> {
        self.entries.get(path)
    }

    /// Iterates over `(path, conditions)` entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionMap)> {
        self.entries.iter().map(|(path, map)| (path.as_str(), map))
    }

    /// Returns the number of field entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no field entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RecordFilter for FieldFilter {
    fn matches<R: Record + ?Sized>(&self, record: &R, options: &FilterOptions) -> Result<bool> {
        for (path, conditions) in &self.entries {
            if !conditions.matches_record(record, path, options)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Two-group filter: all of `AND` and any of `OR`.
///
/// Absent or empty groups are vacuously true.
///
/// ```
/// use relic_query::ComplexFilter;
///
/// let filter: ComplexFilter = serde_json::from_str(r#"{
///     "AND": [{ "price": { "LESS_THAN": 20 } }],
///     "OR": [
///         { "name": { "CONTAINS_VALUE": "riven" } },
///         { "tags": { "IN_ARRAY": "vaulted" } }
///     ]
/// }"#).unwrap();
/// assert_eq!(filter.and.len(), 1);
/// assert_eq!(filter.or.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComplexFilter {
    /// Filters that must all pass.
    #[serde(rename = "AND", default)]
    pub and: Vec<FieldFilter>,
    /// Filters of which at least one must pass.
    #[serde(rename = "OR", default)]
    pub or: Vec<FieldFilter>,
}

impl ComplexFilter {
    /// Creates an empty filter, which every record passes.
    pub fn new() -> Self {
        ComplexFilter::default()
    }

    /// Adds a filter to the AND group.
    pub fn and(mut self, filter: FieldFilter) -> Self {
        self.and.push(filter);
        self
    }

    /// Adds a filter to the OR group.
    pub fn or(mut self, filter: FieldFilter) -> Self {
        self.or.push(filter);
        self
    }

    /// Returns `true` if both groups are empty.
    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty()
    }
}

impl RecordFilter for ComplexFilter {
    fn matches<R: Record + ?Sized>(&self, record: &R, options: &FilterOptions) -> Result<bool> {
        for filter in &self.and {
            if !filter.matches(record, options)? {
                return Ok(false);
            }
        }

        if self.or.is_empty() {
            return Ok(true);
        }
        for filter in &self.or {
            if filter.matches(record, options)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Nested boolean filter tree.
///
/// Unlike the groups of [`ComplexFilter`], an empty `Or` node matches
/// nothing. An empty `And` node matches everything.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Leaf(FieldFilter),
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
}

impl RecordFilter for FilterNode {
    fn matches<R: Record + ?Sized>(&self, record: &R, options: &FilterOptions) -> Result<bool> {
        match self {
            FilterNode::Leaf(filter) => filter.matches(record, options),
            FilterNode::And(children) => {
                for child in children {
                    if !child.matches(record, options)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            FilterNode::Or(children) => {
                for child in children {
                    if child.matches(record, options)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl From<FieldFilter> for FilterNode {
    fn from(filter: FieldFilter) -> Self {
        FilterNode::Leaf(filter)
    }
}

impl From<ComplexFilter> for FilterNode {
    fn from(filter: ComplexFilter) -> Self {
        let mut groups = Vec::with_capacity(2);
        if !filter.and.is_empty() {
            groups.push(FilterNode::And(
                filter.and.into_iter().map(FilterNode::Leaf).collect(),
            ));
        }
        // An empty OR group is vacuously true, so it is left out entirely.
        if !filter.or.is_empty() {
            groups.push(FilterNode::Or(
                filter.or.into_iter().map(FilterNode::Leaf).collect(),
            ));
        }
        FilterNode::And(groups)
    }
}

impl<F: RecordFilter + ?Sized> RecordFilter for &F {
    fn matches<R: Record + ?Sized>(&self, record: &R, options: &FilterOptions) -> Result<bool> {
        (**self).matches(record, options)
    }
}

/// Returns the records that pass `filter` under the default options.
///
/// Order is preserved.
///
/// # Example
///
/// ```
/// use relic_query::{apply_filter, ComplexFilter};
/// use serde_json::json;
///
/// let items = vec![
///     json!({ "name": "Forma", "price": 10 }),
///     json!({ "name": "Riven", "price": 90 }),
/// ];
/// let filter: ComplexFilter =
///     serde_json::from_value(json!({ "AND": [{ "price": { "GREATER_THAN": 50 } }] })).unwrap();
///
/// let kept = apply_filter(&items, &filter).unwrap();
/// assert_eq!(kept, vec![&items[1]]);
/// ```
pub fn apply_filter<'a, T: Record>(items: &'a [T], filter: &ComplexFilter) -> Result<Vec<&'a T>> {
    apply_filter_with(items, filter, &FilterOptions::default())
}

/// Returns the records that pass `filter` under `options`.
///
/// Fails on the first operator error.
pub fn apply_filter_with<'a, T, F>(
    items: &'a [T],
    filter: &F,
    options: &FilterOptions,
) -> Result<Vec<&'a T>>
where
    T: Record,
    F: RecordFilter + ?Sized,
{
    let mut kept = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match filter.matches(item, options) {
            Ok(true) => kept.push(item),
            Ok(false) => {}
            Err(err) => {
                trace!(index, error = %err, "record failed filter evaluation");
                return Err(err);
            }
        }
    }
    debug!(input = items.len(), kept = kept.len(), "applied filter");
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price_below(limit: i64) -> FieldFilter {
        FieldFilter::new().field("price", ConditionMap::new().less_than(limit))
    }

    fn named(name: &str) -> FieldFilter {
        FieldFilter::new().field("name", ConditionMap::new().equals(name))
    }

    fn items() -> Vec<serde_json::Value> {
        vec![
            json!({ "name": "forma", "price": 10 }),
            json!({ "name": "riven", "price": 90 }),
            json!({ "name": "lex", "price": 30 }),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let items = items();
        let kept = apply_filter(&items, &ComplexFilter::new()).unwrap();
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn and_group_requires_all() {
        let items = items();
        let filter = ComplexFilter::new().and(price_below(50)).and(named("lex"));
        let kept = apply_filter(&items, &filter).unwrap();
        assert_eq!(kept, vec![&items[2]]);
    }

    #[test]
    fn or_group_requires_any() {
        let items = items();
        let filter = ComplexFilter::new().or(named("forma")).or(named("riven"));
        let kept = apply_filter(&items, &filter).unwrap();
        assert_eq!(kept, vec![&items[0], &items[1]]);
    }

    #[test]
    fn groups_combine_with_and() {
        let items = items();
        let filter = ComplexFilter::new()
            .and(price_below(50))
            .or(named("riven"))
            .or(named("lex"));
        let kept = apply_filter(&items, &filter).unwrap();
        assert_eq!(kept, vec![&items[2]]);
    }

    #[test]
    fn field_filter_requires_every_entry() {
        let record = json!({ "name": "forma", "price": 10 });
        let filter = price_below(50).field("name", ConditionMap::new().equals("lex"));
        assert!(!filter.matches(&record, &FilterOptions::default()).unwrap());
        assert!(FieldFilter::new()
            .matches(&record, &FilterOptions::default())
            .unwrap());
    }

    #[test]
    fn nodes_nest() {
        let items = items();
        // price < 50 AND (name = forma OR (name = lex AND price < 20))
        let node = FilterNode::And(vec![
            price_below(50).into(),
            FilterNode::Or(vec![
                named("forma").into(),
                FilterNode::And(vec![named("lex").into(), price_below(20).into()]),
            ]),
        ]);
        let kept = apply_filter_with(&items, &node, &FilterOptions::default()).unwrap();
        assert_eq!(kept, vec![&items[0]]);
    }

    #[test]
    fn empty_or_node_matches_nothing() {
        let record = json!({ "name": "forma" });
        let options = FilterOptions::default();
        assert!(!FilterNode::Or(vec![]).matches(&record, &options).unwrap());
        assert!(FilterNode::And(vec![]).matches(&record, &options).unwrap());
    }

    #[test]
    fn complex_filter_converts_to_equivalent_node() {
        let items = items();
        let filters = [
            ComplexFilter::new(),
            ComplexFilter::new().and(price_below(50)),
            ComplexFilter::new().or(named("riven")).or(named("lex")),
            ComplexFilter::new().and(price_below(50)).or(named("riven")),
        ];
        let options = FilterOptions::default();
        for filter in filters {
            let node = FilterNode::from(filter.clone());
            assert_eq!(
                apply_filter_with(&items, &filter, &options).unwrap(),
                apply_filter_with(&items, &node, &options).unwrap(),
            );
        }
    }

    #[test]
    fn operator_errors_propagate() {
        let items = items();
        let filter = ComplexFilter::new().and(
            FieldFilter::new().field("price", ConditionMap::new().contains_value("1")),
        );
        assert!(apply_filter(&items, &filter).is_err());
    }

    #[test]
    fn deserializes_field_filter() {
        let filter: FieldFilter = serde_json::from_value(json!({
            "price": { "LESS_THAN": 20, "type": "number" },
            "name": { "STARTS_WITH": "Arc" },
        }))
        .unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.get("price").is_some());
        assert_eq!(
            filter.iter().map(|(path, _)| path).collect::<Vec<_>>(),
            vec!["name", "price"]
        );
    }
}
