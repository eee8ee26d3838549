//! Query builder and the filter → sort → paginate pipeline.
//!
//! [`Query`] bundles a filter, sort keys, an optional page request and the
//! [`FilterOptions`] to evaluate under. [`QuerySpec`] is the same request in
//! its JSON form.

use serde::Deserialize;
use tracing::debug;

use crate::condition::ConditionMap;
use crate::error::Result;
use crate::filter::{apply_filter_with, ComplexFilter, FieldFilter, FilterNode, RecordFilter};
use crate::options::FilterOptions;
use crate::ordering::{sort_items, Direction, SortKey, SortSpec};
use crate::pagination::Pagination;
use crate::record::Record;

/// A query over a collection of records.
///
/// The filter keeps the two-group shape of [`ComplexFilter`]: every AND
/// member must pass and, if there are OR members, at least one of them
/// must pass. Members can be plain field filters or nested [`FilterNode`]s.
///
/// # Example
///
/// ```
/// use relic_query::{ConditionMap, Query};
/// use serde_json::json;
///
/// let items = vec![
///     json!({ "name": "Forma", "price": 10 }),
///     json!({ "name": "Riven", "price": 90 }),
///     json!({ "name": "Lex Prime", "price": 30 }),
/// ];
///
/// let result = Query::new()
///     .and_field("price", ConditionMap::new().less_than(50))
///     .order_desc("price")
///     .page(1, 1)
///     .run(&items)
///     .unwrap();
///
/// assert_eq!(result.total_count, 2);
/// assert_eq!(result.page_items, vec![&items[2]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    and: Vec<FilterNode>,
    or: Vec<FilterNode>,
    sort: SortSpec,
    pagination: Option<Pagination>,
    options: FilterOptions,
}

impl Query {
    /// Creates an empty query, which returns every record in input order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Filter
    // ========================================================================

    /// Adds the groups of a [`ComplexFilter`] to this query.
    pub fn filter(mut self, filter: ComplexFilter) -> Self {
        self.and.extend(filter.and.into_iter().map(FilterNode::Leaf));
        self.or.extend(filter.or.into_iter().map(FilterNode::Leaf));
        self
    }

    /// Adds a member to the AND group.
    pub fn and(mut self, filter: impl Into<FilterNode>) -> Self {
        self.and.push(filter.into());
        self
    }

    /// Adds a member to the OR group.
    pub fn or(mut self, filter: impl Into<FilterNode>) -> Self {
        self.or.push(filter.into());
        self
    }

    /// Adds a single-field filter to the AND group.
    pub fn and_field(self, path: &str, conditions: ConditionMap) -> Self {
        self.and(FieldFilter::new().field(path, conditions))
    }

    /// Adds a single-field filter to the OR group.
    pub fn or_field(self, path: &str, conditions: ConditionMap) -> Self {
        self.or(FieldFilter::new().field(path, conditions))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds a sort key. Keys added first take precedence.
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.sort = self.sort.then(SortKey::new(field, direction));
        self
    }

    /// Adds an ascending sort key.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Direction::Asc)
    }

    /// Adds a descending sort key.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Direction::Desc)
    }

    /// Replaces the sort keys.
    pub fn sort(mut self, sort: impl Into<SortSpec>) -> Self {
        self.sort = sort.into();
        self
    }

    // ========================================================================
    // Pagination & options
    // ========================================================================

    /// Returns only page `page` (1-indexed) of `page_size` items.
    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Some(Pagination::new(page, page_size));
        self
    }

    /// Sets or clears the page request.
    pub fn pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets the evaluation options.
    pub fn options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the AND group members.
    pub fn and_filters(&self) -> &[FilterNode] {
        &self.and
    }

    /// Returns the OR group members.
    pub fn or_filters(&self) -> &[FilterNode] {
        &self.or
    }

    /// Returns the sort keys.
    pub fn sort_keys(&self) -> &[SortKey] {
        self.sort.keys()
    }

    /// Returns the page request, if any.
    pub fn get_pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Returns the evaluation options.
    pub fn get_options(&self) -> FilterOptions {
        self.options
    }

    /// Returns `true` if the query has no filter, sort keys or page request.
    pub fn is_empty(&self) -> bool {
        self.and.is_empty()
            && self.or.is_empty()
            && self.sort.is_empty()
            && self.pagination.is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs filter, sort and paginate over `items`.
    ///
    /// `total_count` is the number of records that passed the filter, before
    /// pagination.
    pub fn run<'a, T: Record>(&self, items: &'a [T]) -> Result<QueryResult<'a, T>> {
        let mut kept = apply_filter_with(items, self, &self.options)?;
        sort_items(self.sort.keys(), &mut kept);

        let total_count = kept.len();
        let page_items = match self.pagination {
            Some(pagination) => pagination.apply(&kept).to_vec(),
            None => kept,
        };

        debug!(
            input = items.len(),
            total_count,
            returned = page_items.len(),
            "ran query"
        );
        Ok(QueryResult {
            page_items,
            total_count,
        })
    }

    /// Counts the records that pass the filter.
    pub fn count<T: Record>(&self, items: &[T]) -> Result<usize> {
        let mut count = 0;
        for item in items {
            if self.matches(item, &self.options)? {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl RecordFilter for Query {
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

/// Output of [`Query::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a, T> {
    /// Records on the requested page, in sorted order.
    pub page_items: Vec<&'a T>,
    /// Records that passed the filter, across all pages.
    pub total_count: usize,
}

impl<T: Clone> QueryResult<'_, T> {
    /// Clones the page items out of the source collection.
    pub fn cloned(&self) -> Vec<T> {
        self.page_items.iter().map(|item| (*item).clone()).collect()
    }
}

/// JSON form of a query.
///
/// ```
/// use relic_query::QuerySpec;
/// use serde_json::json;
///
/// let spec = QuerySpec::from_json(&json!({
///     "filter": { "AND": [{ "price": { "LESS_THAN": 50 } }] },
///     "sort": [{ "field": "price", "direction": "desc" }],
///     "pagination": { "page": 1, "pageSize": 20 },
/// })).unwrap();
///
/// let items = vec![json!({ "price": 10 }), json!({ "price": 60 })];
/// let result = spec.into_query().run(&items).unwrap();
/// assert_eq!(result.total_count, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuerySpec {
    /// Filter groups; absent means no filtering.
    #[serde(default)]
    pub filter: ComplexFilter,
    /// Sort keys; absent means input order.
    #[serde(default)]
    pub sort: SortSpec,
    /// Page request; absent means every matching record.
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// Evaluation options; absent means the defaults.
    #[serde(default)]
    pub options: FilterOptions,
}

impl QuerySpec {
    /// Parses a query spec from JSON.
    ///
    /// A `sort` entry that is not an array fails with
    /// [`QueryError::InvalidSortSpec`](crate::QueryError::InvalidSortSpec).
    pub fn from_json(json: &serde_json::Value) -> Result<QuerySpec> {
        if let Some(sort) = json.get("sort") {
            SortSpec::from_json(sort)?;
        }
        Ok(serde_json::from_value(json.clone())?)
    }

    /// Parses a query spec from a JSON string.
    pub fn from_json_str(input: &str) -> Result<QuerySpec> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        QuerySpec::from_json(&json)
    }

    /// Converts the spec into a runnable [`Query`].
    pub fn into_query(self) -> Query {
        Query::from(self)
    }
}

impl From<QuerySpec> for Query {
    fn from(spec: QuerySpec) -> Self {
        Query::new()
            .filter(spec.filter)
            .sort(spec.sort)
            .pagination(spec.pagination)
            .options(spec.options)
    }
}
