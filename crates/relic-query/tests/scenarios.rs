//! End-to-end filter, sort and pagination scenarios over JSON records.

use relic_query::{
    apply_filter, apply_filter_with, paginate, sort_items, ComplexFilter, ConditionMap,
    FieldFilter, FilterOptions, MissingFieldPolicy, Query, QueryError, QuerySpec, SortKey,
    SortSpec,
};
use serde_json::{json, Value as Json};

fn filter(json: Json) -> ComplexFilter {
    serde_json::from_value(json).unwrap()
}

fn names<'a>(items: &[&'a Json]) -> Vec<&'a str> {
    items
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

fn catalog() -> Vec<Json> {
    vec![
        json!({
            "name": "Forma",
            "active": true,
            "price": 12,
            "tags": ["prime", "Blueprint"],
            "seller": { "name": "Tenno", "status": "ingame" },
            "listed": "2024-03-05T10:00:00Z",
        }),
        json!({
            "name": "Catalyst",
            "active": false,
            "price": 20,
            "tags": ["booster"],
            "seller": { "name": "Ordis", "status": "offline" },
            "listed": "2023-11-20T08:30:00Z",
        }),
        json!({
            "name": "Riven Mod",
            "active": true,
            "price": 350,
            "tags": [],
            "seller": { "name": "Lotus", "status": "ingame" },
            "listed": "2024-01-15T00:00:00Z",
        }),
        json!({
            "name": "Arcane Grace",
            "active": true,
            "price": 0,
            "tags": ["arcane"],
            "seller": null,
        }),
    ]
}

// ============================================================================
// Filter composition
// ============================================================================

#[test]
fn empty_filter_returns_items_unchanged() {
    let items = catalog();
    let kept = apply_filter(&items, &filter(json!({}))).unwrap();
    assert_eq!(kept, items.iter().collect::<Vec<_>>());

    let kept = apply_filter(&items, &filter(json!({ "AND": [], "OR": [] }))).unwrap();
    assert_eq!(kept.len(), items.len());
}

#[test]
fn search_with_status_filter() {
    let items = vec![
        json!({ "name": "Forma", "active": true, "tags": ["prime"] }),
        json!({ "name": "Catalyst", "active": false, "tags": ["booster"] }),
    ];
    let search = filter(json!({
        "AND": [{ "active": { "EQUALS": true, "type": "boolean" } }],
        "OR": [{ "name": { "CONTAINS_VALUE": "forma" } }],
    }));
    let kept = apply_filter(&items, &search).unwrap();
    assert_eq!(kept, vec![&items[0]]);
}

#[test]
fn mutually_exclusive_conditions_match_nothing() {
    let items = catalog();
    let impossible = ComplexFilter::new().and(FieldFilter::new().field(
        "name",
        ConditionMap::new().equals("forma").equals("catalyst"),
    ));
    assert!(apply_filter(&items, &impossible).unwrap().is_empty());

    let impossible = filter(json!({
        "AND": [{ "price": { "GREATER_THAN": 100, "LESS_THAN": 10 } }],
    }));
    assert!(apply_filter(&items, &impossible).unwrap().is_empty());
}

#[test]
fn or_group_keeps_any_match() {
    let items = catalog();
    let either = filter(json!({
        "OR": [
            { "name": { "STARTS_WITH": "riven" } },
            { "tags": { "IN_ARRAY": "booster" } },
        ],
    }));
    let kept = apply_filter(&items, &either).unwrap();
    assert_eq!(names(&kept), ["Catalyst", "Riven Mod"]);
}

#[test]
fn nested_paths_and_array_fan_out() {
    let items = catalog();
    let ingame = filter(json!({
        "AND": [{ "seller.status": { "EQUALS": "ingame" } }],
    }));
    assert_eq!(
        names(&apply_filter(&items, &ingame).unwrap()),
        ["Forma", "Riven Mod"]
    );

    let records = vec![
        json!({ "name": "a", "attributes": [{ "kind": "crit" }, { "kind": "zoom" }] }),
        json!({ "name": "b", "attributes": [{ "kind": "damage" }] }),
    ];
    let has_zoom = filter(json!({
        "AND": [{ "attributes.kind": { "CONTAINS_VALUE": "zoom" } }],
    }));
    assert_eq!(names(&apply_filter(&records, &has_zoom).unwrap()), ["a"]);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn case_insensitive_containment() {
    let items = vec![json!({ "name": "Riven" }), json!({ "name": "riven" })];

    for operand in ["riven", "Riven"] {
        let insensitive = filter(json!({
            "AND": [{ "name": { "CONTAINS_VALUE": operand } }],
        }));
        assert_eq!(apply_filter(&items, &insensitive).unwrap().len(), 2);

        let sensitive = filter(json!({
            "AND": [{ "name": { "CONTAINS_VALUE": operand, "isCaseSensitive": true } }],
        }));
        let kept = apply_filter(&items, &sensitive).unwrap();
        assert_eq!(names(&kept), [operand]);
    }
}

#[test]
fn range_boundaries() {
    let items: Vec<Json> = [9, 10, 15, 20, 21]
        .into_iter()
        .map(|price| json!({ "name": price.to_string(), "price": price }))
        .collect();

    let between = filter(json!({ "AND": [{ "price": { "BETWEEN_VALUES": [10, 20] } }] }));
    assert_eq!(
        names(&apply_filter(&items, &between).unwrap()),
        ["10", "15", "20"]
    );

    for op in ["OUTSIDE_RANGE", "NOT_BETWEEN_VALUES"] {
        let outside = filter(json!({ "AND": [{ "price": { op: [10, 20] } }] }));
        assert_eq!(names(&apply_filter(&items, &outside).unwrap()), ["9", "21"]);
    }
}

#[test]
fn date_typed_comparison() {
    let items = catalog();
    let recent = filter(json!({
        "AND": [{ "listed": { "GREATER_OR_EQUAL": "2024-01-01", "type": "date" } }],
    }));
    assert_eq!(
        names(&apply_filter(&items, &recent).unwrap()),
        ["Forma", "Riven Mod"]
    );

    let exact = filter(json!({
        "AND": [{ "listed": { "EQUALS": "2024-01-15T00:00:00.000Z", "type": "date" } }],
    }));
    assert_eq!(names(&apply_filter(&items, &exact).unwrap()), ["Riven Mod"]);
}

#[test]
fn number_typed_comparison_of_strings() {
    let items = vec![
        json!({ "name": "a", "rank": "10" }),
        json!({ "name": "b", "rank": "9" }),
    ];
    let untyped = filter(json!({ "AND": [{ "rank": { "GREATER_THAN": "5" } }] }));
    // String comparison: "10" < "5".
    assert_eq!(names(&apply_filter(&items, &untyped).unwrap()), ["b"]);

    let typed = filter(json!({
        "AND": [{ "rank": { "GREATER_THAN": 5, "type": "number" } }],
    }));
    assert_eq!(names(&apply_filter(&items, &typed).unwrap()), ["a", "b"]);
}

#[test]
fn combined_fields_search() {
    let items = catalog();
    let search = filter(json!({
        "AND": [{
            "search": {
                "CONTAINS_VALUE": "forma tenno",
                "combineFields": ["name", "seller.name"],
            }
        }],
    }));
    assert_eq!(names(&apply_filter(&items, &search).unwrap()), ["Forma"]);

    let piped = filter(json!({
        "AND": [{
            "search": {
                "EQUALS": "riven mod|lotus",
                "combineFields": ["name", "seller.name"],
                "combineWith": "|",
            }
        }],
    }));
    assert_eq!(names(&apply_filter(&items, &piped).unwrap()), ["Riven Mod"]);
}

#[test]
fn regex_matching() {
    let items = catalog();
    let pattern = filter(json!({ "AND": [{ "name": { "MATCHES": "^(FORMA|riven)" } }] }));
    assert_eq!(
        names(&apply_filter(&items, &pattern).unwrap()),
        ["Forma", "Riven Mod"]
    );

    let invalid: Result<ComplexFilter, _> =
        serde_json::from_value(json!({ "AND": [{ "name": { "MATCHES": "(" } }] }));
    assert!(invalid.is_err());
}

#[test]
fn containment_on_untyped_number_fails_loudly() {
    let items = catalog();
    let bad = filter(json!({ "AND": [{ "price": { "CONTAINS_VALUE": "2" } }] }));
    let err = apply_filter(&items, &bad).unwrap_err();
    assert!(matches!(
        err,
        QueryError::InvalidOperatorUsage {
            op: "CONTAINS_VALUE",
            value_type: "number"
        }
    ));

    let coerced = filter(json!({
        "AND": [{ "price": { "CONTAINS_VALUE": "2", "type": "string" } }],
    }));
    assert_eq!(
        names(&apply_filter(&items, &coerced).unwrap()),
        ["Forma", "Catalyst"]
    );
}

#[test]
fn unknown_operator_is_rejected() {
    let result: Result<ComplexFilter, _> =
        serde_json::from_value(json!({ "AND": [{ "name": { "LIKE": "x" } }] }));
    assert!(result.is_err());
}

// ============================================================================
// Legacy behavior and its options
// ============================================================================

#[test]
fn falsy_field_fails_every_operator_by_default() {
    let items = catalog();

    // Arcane Grace has a null seller and a price of 0.
    let null_seller = filter(json!({ "AND": [{ "seller": { "IS_NULL": true } }] }));
    assert!(apply_filter(&items, &null_seller).unwrap().is_empty());

    let free = filter(json!({ "AND": [{ "price": { "EQUALS": 0 } }] }));
    assert!(apply_filter(&items, &free).unwrap().is_empty());

    let not_ingame = filter(json!({
        "AND": [{ "seller.status": { "NOT_EQUALS": "ingame" } }],
    }));
    assert_eq!(names(&apply_filter(&items, &not_ingame).unwrap()), ["Catalyst"]);
}

#[test]
fn null_aware_policy_evaluates_missing_fields() {
    let items = catalog();
    let options = FilterOptions::default().missing_field(MissingFieldPolicy::NullAware);

    let null_seller = filter(json!({ "AND": [{ "seller": { "IS_NULL": true } }] }));
    assert_eq!(
        names(&apply_filter_with(&items, &null_seller, &options).unwrap()),
        ["Arcane Grace"]
    );

    let free = filter(json!({ "AND": [{ "price": { "EQUALS": 0 } }] }));
    assert_eq!(
        names(&apply_filter_with(&items, &free, &options).unwrap()),
        ["Arcane Grace"]
    );

    let not_ingame = filter(json!({
        "AND": [{ "seller.status": { "NOT_EQUALS": "ingame" } }],
    }));
    assert_eq!(
        names(&apply_filter_with(&items, &not_ingame, &options).unwrap()),
        ["Catalyst", "Arcane Grace"]
    );
}

#[test]
fn not_matches_does_not_negate_by_default() {
    let items = catalog();
    let not_forma = filter(json!({ "AND": [{ "name": { "NOT_MATCHES": "^forma" } }] }));

    let kept = apply_filter(&items, &not_forma).unwrap();
    assert_eq!(names(&kept), ["Forma"]);

    let options = FilterOptions::default().negate_not_matches(true);
    let kept = apply_filter_with(&items, &not_forma, &options).unwrap();
    assert_eq!(names(&kept), ["Catalyst", "Riven Mod", "Arcane Grace"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn sort_descending() {
    let mut items = vec![json!({ "price": 5 }), json!({ "price": 20 }), json!({ "price": 1 })];
    sort_items(&[SortKey::desc("price")], &mut items);
    assert_eq!(
        items,
        vec![json!({ "price": 20 }), json!({ "price": 5 }), json!({ "price": 1 })]
    );
}

#[test]
fn secondary_key_breaks_ties() {
    let mut items = vec![json!({ "a": 1, "b": 2 }), json!({ "a": 1, "b": 1 })];
    sort_items(&[SortKey::asc("a"), SortKey::asc("b")], &mut items);
    assert_eq!(items[0]["b"], 1);
    assert_eq!(items[1]["b"], 2);
}

#[test]
fn sort_by_collection_size() {
    let items = catalog();
    let mut refs: Vec<&Json> = items.iter().collect();
    sort_items(&[SortKey::desc("tags")], &mut refs);
    assert_eq!(
        names(&refs),
        ["Forma", "Catalyst", "Arcane Grace", "Riven Mod"]
    );
}

#[test]
fn undefined_sorts_first_in_both_directions() {
    let items = catalog();
    for key in [SortKey::asc("listed"), SortKey::desc("listed")] {
        let mut refs: Vec<&Json> = items.iter().collect();
        sort_items(&[key], &mut refs);
        assert_eq!(refs[0]["name"], "Arcane Grace");
    }
}

#[test]
fn sort_spec_must_be_an_array() {
    let err = SortSpec::from_json(&json!("price")).unwrap_err();
    assert!(matches!(err, QueryError::InvalidSortSpec("string")));
}

// ============================================================================
// Pagination and the full pipeline
// ============================================================================

#[test]
fn paginate_windows() {
    let items: Vec<u32> = (0..12).collect();
    assert_eq!(paginate(&items, 2, 5), &items[5..10]);
    assert_eq!(paginate(&items, 3, 5), &items[10..12]);
    assert!(paginate(&items, 4, 5).is_empty());
}

#[test]
fn query_pipeline_reports_total_before_pagination() {
    let items = catalog();
    let result = Query::new()
        .and_field("active", ConditionMap::new().equals(true))
        .order_desc("price")
        .page(2, 1)
        .run(&items)
        .unwrap();
    assert_eq!(result.total_count, 3);
    assert_eq!(names(&result.page_items), ["Forma"]);
}

#[test]
fn query_spec_round_trip_from_json() {
    let items = catalog();
    let spec = QuerySpec::from_json(&json!({
        "filter": {
            "AND": [{ "active": { "EQUALS": true, "type": "boolean" } }],
            "OR": [
                { "name": { "CONTAINS_VALUE": "a" } },
                { "seller.name": { "EQUALS": "Lotus" } },
            ],
        },
        "sort": [{ "field": "price", "direction": "asc" }],
        "pagination": { "page": 1, "pageSize": 2 },
    }))
    .unwrap();

    let result = spec.into_query().run(&items).unwrap();
    assert_eq!(result.total_count, 3);
    assert_eq!(names(&result.page_items), ["Arcane Grace", "Forma"]);
}
