//! Evaluation policies for filters.
//!
//! The defaults reproduce the behavior list views were built against. Two of
//! those behaviors are surprising enough to be switchable: how a field that
//! resolves to nothing is treated, and whether `NOT_MATCHES` negates.

use serde::{Deserialize, Serialize};

/// What happens when a filtered field resolves to a falsy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Any falsy value (missing, null, `0`, `false`, `""`) fails the field
    /// filter before operators run, negated operators included. `IS_NULL`
    /// and `IS_EMPTY` can therefore never pass.
    #[default]
    FailOnFalsy,
    /// Operators always run. Missing and null values get explicit semantics
    /// per operator: null checks pass, negated tests pass, positive tests
    /// fail. Other falsy values are evaluated like any other value.
    NullAware,
}

/// Options controlling filter evaluation.
///
/// # Example
///
/// ```
/// use relic_query::{FilterOptions, MissingFieldPolicy};
///
/// let legacy = FilterOptions::default();
/// assert_eq!(legacy.missing_field, MissingFieldPolicy::FailOnFalsy);
/// assert!(!legacy.negate_not_matches);
///
/// let strict = FilterOptions::strict();
/// assert_eq!(strict.missing_field, MissingFieldPolicy::NullAware);
/// assert!(strict.negate_not_matches);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// Treatment of fields that resolve to falsy values.
    pub missing_field: MissingFieldPolicy,
    /// When `false`, `NOT_MATCHES` runs the same test as `MATCHES`.
    pub negate_not_matches: bool,
}

/// The behavior existing list views depend on.
pub const LEGACY_FILTER_OPTIONS: FilterOptions = FilterOptions {
    missing_field: MissingFieldPolicy::FailOnFalsy,
    negate_not_matches: false,
};

impl FilterOptions {
    /// Options matching [`LEGACY_FILTER_OPTIONS`].
    pub const fn legacy() -> Self {
        LEGACY_FILTER_OPTIONS
    }

    /// Null-aware evaluation with a negating `NOT_MATCHES`.
    pub const fn strict() -> Self {
        FilterOptions {
            missing_field: MissingFieldPolicy::NullAware,
            negate_not_matches: true,
        }
    }

    /// Sets the missing-field policy.
    pub fn missing_field(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_field = policy;
        self
    }

    /// Sets whether `NOT_MATCHES` negates `MATCHES`.
    pub fn negate_not_matches(mut self, negate: bool) -> Self {
        self.negate_not_matches = negate;
        self
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        LEGACY_FILTER_OPTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_legacy() {
        assert_eq!(FilterOptions::default(), LEGACY_FILTER_OPTIONS);
        assert_eq!(FilterOptions::legacy(), LEGACY_FILTER_OPTIONS);
    }

    #[test]
    fn setters() {
        let options = FilterOptions::default()
            .missing_field(MissingFieldPolicy::NullAware)
            .negate_not_matches(true);
        assert_eq!(options, FilterOptions::strict());
    }

    #[test]
    fn deserializes_with_defaults() {
        let options: FilterOptions =
            serde_json::from_str(r#"{ "negateNotMatches": true }"#).unwrap();
        assert_eq!(options.missing_field, MissingFieldPolicy::FailOnFalsy);
        assert!(options.negate_not_matches);

        let options: FilterOptions =
            serde_json::from_str(r#"{ "missingField": "null_aware" }"#).unwrap();
        assert_eq!(options.missing_field, MissingFieldPolicy::NullAware);
    }
}
