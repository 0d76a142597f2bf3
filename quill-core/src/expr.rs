//! Expression primitives
//!
//! An expression renders to a text fragment without looking at where it is
//! placed, so one value can be cloned into as many statements as needed.
//! Nothing here validates its input: names, literals and operators are
//! written out verbatim and quoting is the caller's job.

use std::borrow::Cow;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::builder::{Clause, Statement};
use crate::operator::{IntoOperator, Operator};

/// The bind-parameter marker
pub const PLACEHOLDER: &str = "?";

/// Separator for argument, column and table lists
pub const DEFAULT_DELIMITER: &str = ", ";

/// Anything that can render itself as SQL text
pub trait Expression {
    /// Append the SQL text of this value to `out`
    fn write_sql(&self, out: &mut String);

    /// Render this value into a new string
    fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}

/// Sort direction for ordered columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable SQL fragment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A name written verbatim: column, table, `*`, or any raw text
    Ref(String),
    /// A single-quoted literal
    Const(String),
    /// `<expr> as '<alias>'`
    As { expr: Box<Expr>, alias: String },
    /// `(<expr>)`
    Wrap(Box<Expr>),
    /// `<name>(<args>)`
    Func { name: String, args: Vec<Expr> },
    /// `<left> <operator>` followed by ` <right>` when there is a right operand
    Predicate {
        operator: Operator,
        left: Box<Expr>,
        right: Option<Box<Expr>>,
    },
    /// Items joined by a delimiter
    List {
        delimiter: Cow<'static, str>,
        items: Vec<Expr>,
    },
    /// `<function> over (<clause>)`
    Window { function: String, clause: Box<Clause> },
    /// `<expr> asc` or `<expr> desc`
    Sorted {
        expr: Box<Expr>,
        direction: SortDirection,
    },
    /// A full statement, rendered without parentheses
    Statement(Box<Statement>),
    /// The bind-parameter marker
    Placeholder,
}

impl Expr {
    /// Alias this expression: `<expr> as '<alias>'`
    pub fn as_alias(self, alias: impl Into<String>) -> Expr {
        Expr::As {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    /// True for a list without items
    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::List { items, .. } if items.is_empty())
    }

    /// Collect every statement nested in this expression, outermost first
    pub(crate) fn nested_statements<'a>(&'a self, found: &mut Vec<&'a Statement>) {
        match self {
            Expr::Ref(_) | Expr::Const(_) | Expr::Placeholder => {}
            Expr::As { expr, .. } | Expr::Wrap(expr) | Expr::Sorted { expr, .. } => {
                expr.nested_statements(found)
            }
            Expr::Func { args: items, .. } | Expr::List { items, .. } => {
                for item in items {
                    item.nested_statements(found);
                }
            }
            Expr::Predicate { left, right, .. } => {
                left.nested_statements(found);
                if let Some(right) = right {
                    right.nested_statements(found);
                }
            }
            Expr::Window { clause, .. } => clause.nested_statements(found),
            Expr::Statement(statement) => found.push(statement),
        }
    }
}

impl Expression for Expr {
    fn write_sql(&self, out: &mut String) {
        match self {
            Expr::Ref(name) => out.push_str(name),
            Expr::Const(value) => {
                out.push('\'');
                out.push_str(value);
                out.push('\'');
            }
            Expr::As { expr, alias } => {
                expr.write_sql(out);
                out.push_str(" as '");
                out.push_str(alias);
                out.push('\'');
            }
            Expr::Wrap(expr) => {
                out.push('(');
                expr.write_sql(out);
                out.push(')');
            }
            Expr::Func { name, args } => {
                out.push_str(name);
                out.push('(');
                write_joined(out, args, DEFAULT_DELIMITER);
                out.push(')');
            }
            Expr::Predicate {
                operator,
                left,
                right,
            } => {
                left.write_sql(out);
                out.push(' ');
                out.push_str(operator.as_str());
                if let Some(right) = right {
                    out.push(' ');
                    right.write_sql(out);
                }
            }
            Expr::List { delimiter, items } => write_joined(out, items, delimiter),
            Expr::Window { function, clause } => {
                out.push_str(function);
                out.push_str(" over (");
                clause.write_sql(out);
                out.push(')');
            }
            Expr::Sorted { expr, direction } => {
                expr.write_sql(out);
                out.push(' ');
                out.push_str(direction.as_str());
            }
            Expr::Statement(statement) => statement.write_sql(out),
            Expr::Placeholder => out.push_str(PLACEHOLDER),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Ref(name.to_string())
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::Ref(name)
    }
}

/// Renders the statement without parentheses; use [`subselect`] to nest it.
impl From<Statement> for Expr {
    fn from(statement: Statement) -> Self {
        Expr::Statement(Box::new(statement))
    }
}

pub(crate) fn write_joined<E: Expression>(out: &mut String, items: &[E], delimiter: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        item.write_sql(out);
    }
}

pub(crate) fn collect<I>(items: I) -> Vec<Expr>
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    items.into_iter().map(Into::into).collect()
}

/// A name reference, written verbatim
///
/// # Examples
/// ```
/// use quill_core::{col, Expression};
///
/// assert_eq!(col("users.id").to_sql(), "users.id");
/// ```
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Ref(name.into())
}

/// A name reference with an alias: `<name> as '<alias>'`
pub fn col_as(name: impl Into<String>, alias: impl Into<String>) -> Expr {
    col(name).as_alias(alias)
}

/// A single-quoted literal. Embedded quotes are not escaped.
pub fn constant(value: impl Into<String>) -> Expr {
    Expr::Const(value.into())
}

/// Alias any expression. The alias is always rendered as a quoted literal.
pub fn alias(expr: impl Into<Expr>, name: impl Into<String>) -> Expr {
    expr.into().as_alias(name)
}

/// Parenthesize an expression
pub fn wrap(expr: impl Into<Expr>) -> Expr {
    Expr::Wrap(Box::new(expr.into()))
}

/// A function call with comma-separated arguments
///
/// # Examples
/// ```
/// use quill_core::{col, constant, func, Expression};
///
/// let expr = func("coalesce", [col("title"), constant("no title")]);
/// assert_eq!(expr.to_sql(), "coalesce(title, 'no title')");
/// ```
pub fn func<I>(name: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::Func {
        name: name.into(),
        args: collect(args),
    }
}

/// Items joined by an arbitrary delimiter
pub fn list<I>(delimiter: impl Into<Cow<'static, str>>, items: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::List {
        delimiter: delimiter.into(),
        items: collect(items),
    }
}

/// A comma-separated projection list
pub fn columns<I>(items: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    list(DEFAULT_DELIMITER, items)
}

/// A window function: `<function> over (<clause>)`. The function text is raw.
pub fn window(function: impl Into<String>, clause: Clause) -> Expr {
    Expr::Window {
        function: function.into(),
        clause: Box::new(clause),
    }
}

/// A parenthesized statement usable wherever an expression is
pub fn subselect(statement: Statement) -> Expr {
    wrap(statement)
}

/// `<expr> asc`
pub fn asc(expr: impl Into<Expr>) -> Expr {
    Expr::Sorted {
        expr: Box::new(expr.into()),
        direction: SortDirection::Asc,
    }
}

/// `<expr> desc`
pub fn desc(expr: impl Into<Expr>) -> Expr {
    Expr::Sorted {
        expr: Box::new(expr.into()),
        direction: SortDirection::Desc,
    }
}

/// The generic predicate. A missing right operand renders only `<left> <op>`.
pub fn predicate(
    operator: impl IntoOperator,
    left: impl Into<Expr>,
    right: Option<Expr>,
) -> Expr {
    Expr::Predicate {
        operator: operator.into_operator(),
        left: Box::new(left.into()),
        right: right.map(Box::new),
    }
}

/// `<left> = <right>`
pub fn eq(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::EQ, left, Some(right.into()))
}

/// `<left> > <right>`
pub fn gt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::GT, left, Some(right.into()))
}

/// `<left> < <right>`
pub fn lt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::LT, left, Some(right.into()))
}

/// `<left> >= <right>`
pub fn gte(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::GTE, left, Some(right.into()))
}

/// `<left> <= <right>`
pub fn lte(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::LTE, left, Some(right.into()))
}

/// `<left> like <right>`
pub fn like(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::LIKE, left, Some(right.into()))
}

/// `<left> not like <right>`
pub fn not_like(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::NOT_LIKE, left, Some(right.into()))
}

/// `<left> between <right>`; the right side carries both bounds
pub fn between(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::BETWEEN, left, Some(right.into()))
}

/// `<left> in (<right>)`. The right operand is always parenthesized, so it
/// can be a value list or a statement.
pub fn in_(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    predicate(Operator::IN, left, Some(wrap(right)))
}

/// `<expr> is null`
pub fn is_null(expr: impl Into<Expr>) -> Expr {
    predicate(Operator::IS_NULL, expr, None)
}

/// `<expr> is not null`
pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
    predicate(Operator::IS_NOT_NULL, expr, None)
}

/// The bind-parameter marker, always `?`
pub fn placeholder() -> Expr {
    Expr::Placeholder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{from, order_by, select};

    #[test]
    fn test_ref_and_const() {
        assert_eq!(col("i.id").to_sql(), "i.id");
        assert_eq!(constant("earth").to_sql(), "'earth'");
        assert_eq!(constant("it's").to_sql(), "'it's'");
    }

    #[test]
    fn test_alias_is_quoted() {
        assert_eq!(col_as("items", "i").to_sql(), "items as 'i'");
        assert_eq!(
            alias(func("count", ["*"]), "total").to_sql(),
            "count(*) as 'total'"
        );
    }

    #[test]
    fn test_func_arguments() {
        assert_eq!(func("now", Vec::<Expr>::new()).to_sql(), "now()");
        assert_eq!(
            func("coalesce", [col("location"), constant("earth")]).to_sql(),
            "coalesce(location, 'earth')"
        );
    }

    #[test]
    fn test_binary_predicates() {
        assert_eq!(eq(col("id"), placeholder()).to_sql(), "id = ?");
        assert_eq!(gt(col("a"), col("b")).to_sql(), "a > b");
        assert_eq!(lt(col("a"), col("b")).to_sql(), "a < b");
        assert_eq!(gte(col("a"), col("b")).to_sql(), "a >= b");
        assert_eq!(lte(col("a"), col("b")).to_sql(), "a <= b");
        assert_eq!(like(col("t"), placeholder()).to_sql(), "t like ?");
        assert_eq!(not_like(col("t"), placeholder()).to_sql(), "t not like ?");
        assert_eq!(
            between(col("n"), col("? and ?")).to_sql(),
            "n between ? and ?"
        );
    }

    #[test]
    fn test_unary_predicates_omit_right_operand() {
        assert_eq!(is_null(col("x")).to_sql(), "x is null");
        assert_eq!(is_not_null(col("x")).to_sql(), "x is not null");
        assert_eq!(predicate("exists", col("x"), None).to_sql(), "x exists");
    }

    #[test]
    fn test_in_always_wraps_right_operand() {
        assert_eq!(in_(col("t.name"), placeholder()).to_sql(), "t.name in (?)");
        assert_eq!(
            in_(col("id"), columns(["1", "2", "3"])).to_sql(),
            "id in (1, 2, 3)"
        );

        let ids = select(col("id"), [from(["archived"])]);
        assert_eq!(
            in_(col("id"), ids).to_sql(),
            "id in (select id from archived)"
        );
    }

    #[test]
    fn test_window_renders_clause_with_keyword() {
        let expr = window("row_number()", order_by(["uu.id"])).as_alias("row");
        assert_eq!(expr.to_sql(), "row_number() over (order by uu.id) as 'row'");
    }

    #[test]
    fn test_sorted_columns() {
        assert_eq!(desc("created_at").to_sql(), "created_at desc");
        assert_eq!(asc(col("name")).to_sql(), "name asc");
    }

    #[test]
    fn test_lists() {
        assert_eq!(columns(["id", "name"]).to_sql(), "id, name");
        assert_eq!(list(" || ", ["a", "b"]).to_sql(), "a || b");
        assert!(columns(Vec::<Expr>::new()).is_empty());
        assert!(!columns(["id"]).is_empty());
    }

    #[test]
    fn test_subselect_is_wrapped() {
        let sub = select(col("1 + 1"), []);
        assert_eq!(subselect(sub.clone()).to_sql(), "(select 1 + 1)");
        assert_eq!(Expr::from(sub).to_sql(), "select 1 + 1");
    }

    #[test]
    fn test_display_matches_to_sql() {
        let expr = eq(col("a"), placeholder());
        assert_eq!(expr.to_string(), expr.to_sql());
    }
}
