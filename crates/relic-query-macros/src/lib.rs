//! Proc macros for relic-query.
//!
//! # Derive Macros
//!
//! - [`Record`] - Implement `relic_query::Record` for a struct and generate
//!   field name constants

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait so a struct can be filtered and sorted.
///
/// Every named field is exposed under its own name unless skipped. Plain
/// fields convert through `relic_query::ToValue`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
/// | `nested` | Field implements `Record`; dotted paths descend into it |
/// | `nested_list` | Field is a collection of records; dotted paths fan out over it |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Listing::PRICE`)
/// 2. Implementation of `Record::field()`
///
/// # Example
///
/// ```ignore
/// use relic_query::{ConditionMap, Query, Record};
///
/// #[derive(Record)]
/// struct Seller {
///     name: String,
///     reputation: u32,
/// }
///
/// #[derive(Record)]
/// struct Listing {
///     name: String,
///     price: u32,
///     #[record(nested)]
///     seller: Seller,
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let listings = vec![Listing {
///     name: "Forma".into(),
///     price: 12,
///     seller: Seller { name: "tenno".into(), reputation: 40 },
///     internal_id: 1,
/// }];
///
/// let result = Query::new()
///     .and_field("seller.reputation", ConditionMap::new().greater_than(10))
///     .order_asc(Listing::PRICE)
///     .run(&listings)
///     .unwrap();
/// assert_eq!(result.total_count, 1);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
