//! Comparison operators for filter conditions.
//!
//! The [`Operator`] enum names every supported operator. Operators are
//! grouped by the shape of operand they take; [`crate::Condition`] carries
//! the operand itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Comparison operator for a filter condition.
///
/// Operators are grouped by operand shape:
/// - **Scalar**: `Equals`, `NotEquals`, the ordering operators, the
///   containment and affix operators, and the membership operators
/// - **Range**: `BetweenValues`, `NotBetweenValues`, `OutsideRange`
/// - **Pattern**: `Matches`, `NotMatches`
/// - **None**: the null and emptiness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    /// The field's collection includes the operand.
    InArray,
    /// The field's collection does not include the operand.
    NotInArray,
    /// Case-insensitive regex test against the value's string form.
    Matches,
    NotMatches,
    IsNull,
    IsNotNull,
    /// Inclusive range test.
    BetweenValues,
    /// Value below the minimum or above the maximum.
    NotBetweenValues,
    IsEmpty,
    IsNotEmpty,
    ContainsValue,
    DoesNotContain,
    StartsWith,
    DoesNotStartWith,
    EndsWith,
    DoesNotEndWith,
    IsStrictlyEmpty,
    IsStrictlyNotEmpty,
    /// Value below the minimum or above the maximum.
    OutsideRange,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 25] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::InArray,
        Operator::NotInArray,
        Operator::Matches,
        Operator::NotMatches,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::BetweenValues,
        Operator::NotBetweenValues,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::ContainsValue,
        Operator::DoesNotContain,
        Operator::StartsWith,
        Operator::DoesNotStartWith,
        Operator::EndsWith,
        Operator::DoesNotEndWith,
        Operator::IsStrictlyEmpty,
        Operator::IsStrictlyNotEmpty,
        Operator::OutsideRange,
    ];

    /// Returns `true` if this operator takes a `[min, max]` operand.
    pub fn is_range_op(self) -> bool {
        matches!(
            self,
            Operator::BetweenValues | Operator::NotBetweenValues | Operator::OutsideRange
        )
    }

    /// Returns `true` if this operator takes a regex pattern operand.
    pub fn is_pattern_op(self) -> bool {
        matches!(self, Operator::Matches | Operator::NotMatches)
    }

    /// Returns `true` if this operator ignores its operand.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::IsNull
                | Operator::IsNotNull
                | Operator::IsEmpty
                | Operator::IsNotEmpty
                | Operator::IsStrictlyEmpty
                | Operator::IsStrictlyNotEmpty
        )
    }

    /// Returns `true` for the negated form of a positive test.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Operator::NotEquals
                | Operator::NotInArray
                | Operator::NotMatches
                | Operator::IsNotNull
                | Operator::IsNotEmpty
                | Operator::DoesNotContain
                | Operator::DoesNotStartWith
                | Operator::DoesNotEndWith
                | Operator::IsStrictlyNotEmpty
        )
    }

    /// Returns the wire name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterOrEqual => "GREATER_OR_EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessOrEqual => "LESS_OR_EQUAL",
            Operator::InArray => "IN_ARRAY",
            Operator::NotInArray => "NOT_IN_ARRAY",
            Operator::Matches => "MATCHES",
            Operator::NotMatches => "NOT_MATCHES",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::BetweenValues => "BETWEEN_VALUES",
            Operator::NotBetweenValues => "NOT_BETWEEN_VALUES",
            Operator::IsEmpty => "IS_EMPTY",
            Operator::IsNotEmpty => "IS_NOT_EMPTY",
            Operator::ContainsValue => "CONTAINS_VALUE",
            Operator::DoesNotContain => "DOES_NOT_CONTAIN",
            Operator::StartsWith => "STARTS_WITH",
            Operator::DoesNotStartWith => "DOES_NOT_START_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::DoesNotEndWith => "DOES_NOT_END_WITH",
            Operator::IsStrictlyEmpty => "IS_STRICTLY_EMPTY",
            Operator::IsStrictlyNotEmpty => "IS_STRICTLY_NOT_EMPTY",
            Operator::OutsideRange => "OUTSIDE_RANGE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::InvalidCondition(format!("unknown operator '{}'", s)))
    }
}
