//! Relic Query - In-memory filter, sort and pagination for record collections.
//!
//! The engine runs a fixed three-stage pipeline over an already materialized
//! slice of records:
//!
//! 1. **Filter**: keep the records that pass a [`ComplexFilter`]
//! 2. **Sort**: order them by a list of [`SortKey`]s
//! 3. **Paginate**: cut out one 1-indexed page
//!
//! Records are anything implementing [`Record`]: JSON documents out of the
//! box, and plain structs through `#[derive(Record)]`.
//!
//! # Quick Start
//!
//! ```rust
//! use relic_query::{apply_filter, paginate, sort_items, ComplexFilter, SortKey};
//! use serde_json::json;
//!
//! let listings = vec![
//!     json!({ "name": "Arcane Energize", "price": 350, "seller": { "status": "ingame" } }),
//!     json!({ "name": "Forma Blueprint", "price": 8, "seller": { "status": "offline" } }),
//!     json!({ "name": "Arcane Grace", "price": 120, "seller": { "status": "ingame" } }),
//! ];
//!
//! let filter: ComplexFilter = serde_json::from_value(json!({
//!     "AND": [{ "seller.status": { "EQUALS": "ingame" } }],
//!     "OR": [{ "name": { "STARTS_WITH": "arcane" } }]
//! })).unwrap();
//!
//! let mut kept = apply_filter(&listings, &filter).unwrap();
//! sort_items(&[SortKey::asc("price")], &mut kept);
//! let page = paginate(&kept, 1, 10);
//!
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0]["name"], "Arcane Grace");
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! match = (every AND field filter passes, or AND is empty)
//!       ∧ (some OR field filter passes, or OR is empty)
//! ```
//!
//! A field filter maps field paths to condition maps. Every operator in a
//! condition map must hold for its field, and every field must pass. Before
//! operators run, the resolved value is coerced to the map's declared
//! [`OperatorType`] and, unless the map is case sensitive, lower-cased.
//!
//! Two behaviors are configurable through [`FilterOptions`]; the defaults
//! keep the historical semantics:
//!
//! - A field resolving to a falsy value fails its filter before any operator
//!   runs ([`MissingFieldPolicy::FailOnFalsy`]).
//! - `NOT_MATCHES` runs the same test as `MATCHES`.
//!
//! [`FilterOptions::strict`] switches both.
//!
//! # Sort Semantics
//!
//! Keys are compared left to right. Undefined values sort first in either
//! direction, arrays compare by length and values of different kinds fall
//! back to a fixed kind rank, so the comparator is a total order.

extern crate self as relic_query;

mod coerce;
mod condition;
mod error;
mod filter;
mod op;
mod options;
mod ordering;
mod pagination;
mod path;
mod query;
mod record;
mod value;

// Re-export public API
pub use coerce::{coerce, OperatorType};
pub use condition::{Condition, ConditionMap, Operand, Pattern, Range, DEFAULT_COMBINE_SEPARATOR};
pub use error::{QueryError, Result};
pub use filter::{apply_filter, apply_filter_with, ComplexFilter, FieldFilter, FilterNode, RecordFilter};
pub use op::Operator;
pub use options::{FilterOptions, MissingFieldPolicy, LEGACY_FILTER_OPTIONS};
pub use ordering::{
    compare_records, compare_values, sort_items, Direction, SortKey, SortSpec,
    UNDEFINED_SORTS_FIRST,
};
pub use pagination::{page_count, paginate, safe_page, Pagination};
pub use path::resolve;
pub use query::{Query, QueryResult, QuerySpec};
pub use record::{nested, nested_list, Record, ToValue};
pub use relic_query_macros::Record;
pub use value::{Number, Timestamp, Value};
