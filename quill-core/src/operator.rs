//! SQL operator types and conversions

use std::borrow::Cow;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operator text placed between the operands of a predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Operator(Cow<'static, str>);

impl Operator {
    pub const EQ: Self = Operator(Cow::Borrowed("="));
    pub const NEQ: Self = Operator(Cow::Borrowed("!="));
    pub const GT: Self = Operator(Cow::Borrowed(">"));
    pub const LT: Self = Operator(Cow::Borrowed("<"));
    pub const GTE: Self = Operator(Cow::Borrowed(">="));
    pub const LTE: Self = Operator(Cow::Borrowed("<="));
    pub const LIKE: Self = Operator(Cow::Borrowed("like"));
    pub const NOT_LIKE: Self = Operator(Cow::Borrowed("not like"));
    pub const BETWEEN: Self = Operator(Cow::Borrowed("between"));
    pub const IN: Self = Operator(Cow::Borrowed("in"));
    pub const IS_NULL: Self = Operator(Cow::Borrowed("is null"));
    pub const IS_NOT_NULL: Self = Operator(Cow::Borrowed("is not null"));

    /// Create a custom operator for database-specific operations
    ///
    /// # Examples
    /// ```
    /// use quill_core::Operator;
    ///
    /// // PostgreSQL full-text search
    /// let fts_op = Operator::custom("@@");
    /// assert_eq!(fts_op.as_str(), "@@");
    /// ```
    pub const fn custom(op: &'static str) -> Self {
        Operator(Cow::Borrowed(op))
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for types that can be converted to SQL operators
pub trait IntoOperator {
    fn into_operator(self) -> Operator;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Operator {
        self
    }
}

/// Known spellings map onto the constants, anything else is kept verbatim
impl IntoOperator for &'static str {
    fn into_operator(self) -> Operator {
        match self {
            "=" => Operator::EQ,
            "!=" | "<>" => Operator::NEQ,
            ">" => Operator::GT,
            "<" => Operator::LT,
            ">=" => Operator::GTE,
            "<=" => Operator::LTE,
            "like" | "LIKE" => Operator::LIKE,
            "not like" | "NOT LIKE" => Operator::NOT_LIKE,
            "between" | "BETWEEN" => Operator::BETWEEN,
            "in" | "IN" => Operator::IN,
            "is null" | "IS NULL" => Operator::IS_NULL,
            "is not null" | "IS NOT NULL" => Operator::IS_NOT_NULL,
            other => Operator::custom(other),
        }
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> Operator {
        Operator(Cow::Owned(self))
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const NEQ: Operator = Operator::NEQ;
    pub const GT: Operator = Operator::GT;
    pub const LT: Operator = Operator::LT;
    pub const GTE: Operator = Operator::GTE;
    pub const LTE: Operator = Operator::LTE;
    pub const LIKE: Operator = Operator::LIKE;
    pub const NOT_LIKE: Operator = Operator::NOT_LIKE;
    pub const BETWEEN: Operator = Operator::BETWEEN;
    pub const IN: Operator = Operator::IN;
    pub const IS_NULL: Operator = Operator::IS_NULL;
    pub const IS_NOT_NULL: Operator = Operator::IS_NOT_NULL;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_constants() {
        assert_eq!(Operator::GT.as_str(), ">");
        assert_eq!(Operator::LTE.as_str(), "<=");
        assert_eq!(Operator::EQ.as_str(), "=");
        assert_eq!(Operator::NOT_LIKE.as_str(), "not like");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Operator::GTE), ">=");
        assert_eq!(format!("{}", Operator::IS_NOT_NULL), "is not null");
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(">".into_operator(), Operator::GT);
        assert_eq!("LIKE".into_operator(), Operator::LIKE);
        assert_eq!("<>".into_operator(), Operator::NEQ);
        assert_eq!("IS NULL".into_operator(), op::IS_NULL);
    }

    #[test]
    fn test_unknown_string_becomes_custom() {
        assert_eq!("@@".into_operator(), Operator::custom("@@"));
        assert_eq!(String::from("<->").into_operator().as_str(), "<->");
    }

    #[test]
    fn test_owned_and_borrowed_compare_equal() {
        assert_eq!(String::from("in").into_operator(), Operator::IN);
    }
}
