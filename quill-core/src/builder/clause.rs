//! Clause types and the functions that create them

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::expr::{collect, subselect, write_joined, Expr, Expression, DEFAULT_DELIMITER};

use super::select::Statement;

/// The kinds of clause a statement can hold.
///
/// Declaration order is output order: clauses are always rendered in
/// ascending kind order no matter when they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClauseKind {
    From,
    Join,
    LeftJoin,
    Where,
    GroupBy,
    OrderBy,
}

impl ClauseKind {
    /// Number of clause kinds
    pub const COUNT: usize = 6;

    /// Every kind in output order
    pub const ALL: [ClauseKind; Self::COUNT] = [
        ClauseKind::From,
        ClauseKind::Join,
        ClauseKind::LeftJoin,
        ClauseKind::Where,
        ClauseKind::GroupBy,
        ClauseKind::OrderBy,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::From => "from",
            ClauseKind::Join => "join",
            ClauseKind::LeftJoin => "left join",
            ClauseKind::Where => "where",
            ClauseKind::GroupBy => "group by",
            ClauseKind::OrderBy => "order by",
        }
    }

    /// Separator placed between clauses of this kind in one statement
    pub fn delimiter(self) -> &'static str {
        match self {
            ClauseKind::From | ClauseKind::GroupBy | ClauseKind::OrderBy => DEFAULT_DELIMITER,
            ClauseKind::Join | ClauseKind::LeftJoin => " ",
            ClauseKind::Where => " and ",
        }
    }

    /// Slot of this kind in an output-ordered accumulator
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a standalone rendering of this kind starts with its keyword.
    /// `from` and `where` leave the keyword to the statement.
    pub fn renders_keyword(self) -> bool {
        !matches!(self, ClauseKind::From | ClauseKind::Where)
    }
}

impl Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One statement fragment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Clause {
    From { tables: Vec<Expr> },
    Join { table: Expr, predicates: Vec<Expr> },
    LeftJoin { table: Expr, predicates: Vec<Expr> },
    /// One parenthesized group of predicates
    Where { predicates: Vec<Expr> },
    GroupBy { columns: Vec<Expr> },
    OrderBy { columns: Vec<Expr> },
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::From { .. } => ClauseKind::From,
            Clause::Join { .. } => ClauseKind::Join,
            Clause::LeftJoin { .. } => ClauseKind::LeftJoin,
            Clause::Where { .. } => ClauseKind::Where,
            Clause::GroupBy { .. } => ClauseKind::GroupBy,
            Clause::OrderBy { .. } => ClauseKind::OrderBy,
        }
    }

    pub fn delimiter(&self) -> &'static str {
        self.kind().delimiter()
    }

    /// True when the clause has nothing to render after its keyword
    pub fn is_empty(&self) -> bool {
        match self {
            Clause::From { tables } => tables.is_empty(),
            Clause::Join { predicates, .. }
            | Clause::LeftJoin { predicates, .. }
            | Clause::Where { predicates } => predicates.is_empty(),
            Clause::GroupBy { columns } | Clause::OrderBy { columns } => columns.is_empty(),
        }
    }

    /// Write the clause without its leading keyword
    pub fn write_body(&self, out: &mut String) {
        match self {
            Clause::From { tables } => write_joined(out, tables, DEFAULT_DELIMITER),
            Clause::Join { table, predicates } | Clause::LeftJoin { table, predicates } => {
                table.write_sql(out);
                if !predicates.is_empty() {
                    out.push_str(" on ");
                    write_joined(out, predicates, " and ");
                }
            }
            Clause::Where { predicates } => {
                out.push('(');
                write_joined(out, predicates, " and ");
                out.push(')');
            }
            Clause::GroupBy { columns } | Clause::OrderBy { columns } => {
                write_joined(out, columns, DEFAULT_DELIMITER)
            }
        }
    }

    pub(crate) fn nested_statements<'a>(&'a self, found: &mut Vec<&'a Statement>) {
        let exprs = match self {
            Clause::Join { table, predicates } | Clause::LeftJoin { table, predicates } => {
                table.nested_statements(found);
                predicates
            }
            Clause::From { tables: exprs }
            | Clause::Where { predicates: exprs }
            | Clause::GroupBy { columns: exprs }
            | Clause::OrderBy { columns: exprs } => exprs,
        };
        for expr in exprs {
            expr.nested_statements(found);
        }
    }
}

impl Expression for Clause {
    fn write_sql(&self, out: &mut String) {
        let kind = self.kind();
        if kind.renders_keyword() {
            out.push_str(kind.keyword());
            out.push(' ');
        }
        self.write_body(out);
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Table expressions for the from clause, comma-joined in argument order
///
/// # Examples
/// ```
/// use quill_core::{col, col_as, from, select, Expression};
///
/// let query = select(col("*"), [from([col("a"), col_as("b", "bb")])]);
/// assert_eq!(query.to_sql(), "select * from a, b as 'bb'");
/// ```
pub fn from<I>(tables: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::From {
        tables: collect(tables),
    }
}

/// Use a statement as a from table. It is parenthesized, and aliased unless
/// `alias` is empty.
pub fn from_subselect(statement: Statement, alias: &str) -> Clause {
    let table = subselect(statement);
    let table = if alias.is_empty() {
        table
    } else {
        table.as_alias(alias)
    };

    from([table])
}

/// `join <table> on <predicates joined by and>`
pub fn join<I>(table: impl Into<Expr>, predicates: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::Join {
        table: table.into(),
        predicates: collect(predicates),
    }
}

/// `left join <table> on <predicates joined by and>`
pub fn left_join<I>(table: impl Into<Expr>, predicates: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::LeftJoin {
        table: table.into(),
        predicates: collect(predicates),
    }
}

/// A group of predicates joined with `and` and parenthesized.
///
/// Every where clause on a statement contributes its own group; the groups
/// are conjoined under a single `where` keyword.
///
/// # Examples
/// ```
/// use quill_core::{col, eq, from, placeholder, select, where_, Expression};
///
/// let query = select(
///     col("*"),
///     [
///         from(["items"]),
///         where_([eq(col("foo"), placeholder()), eq(col("bar"), placeholder())]),
///         where_([eq(col("baz"), placeholder())]),
///     ],
/// );
/// assert_eq!(
///     query.to_sql(),
///     "select * from items where (foo = ? and bar = ?) and (baz = ?)"
/// );
/// ```
pub fn where_<I>(predicates: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::Where {
        predicates: collect(predicates),
    }
}

pub fn group_by<I>(columns: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::GroupBy {
        columns: collect(columns),
    }
}

pub fn order_by<I>(columns: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Clause::OrderBy {
        columns: collect(columns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, col_as, desc, eq, placeholder};
    use crate::builder::select;

    #[test]
    fn test_kind_order_is_output_order() {
        let mut sorted = ClauseKind::ALL;
        sorted.sort();
        assert_eq!(sorted, ClauseKind::ALL);

        for (i, kind) in ClauseKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert!(ClauseKind::Join < ClauseKind::LeftJoin);
        assert!(ClauseKind::Where < ClauseKind::GroupBy);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(from(["a"]).delimiter(), ", ");
        assert_eq!(join("a", ["x"]).delimiter(), " ");
        assert_eq!(left_join("a", ["x"]).delimiter(), " ");
        assert_eq!(where_(["x"]).delimiter(), " and ");
        assert_eq!(group_by(["a"]).delimiter(), ", ");
        assert_eq!(order_by(["a"]).delimiter(), ", ");
    }

    #[test]
    fn test_from_has_no_keyword() {
        assert_eq!(from(["items", "tags"]).to_sql(), "items, tags");
    }

    #[test]
    fn test_join_renders_keyword_and_predicates() {
        let clause = join(
            col_as("urls", "u"),
            [eq(col("u.id"), col("uu.url_id")), eq(col("u.live"), placeholder())],
        );
        assert_eq!(
            clause.to_sql(),
            "join urls as 'u' on u.id = uu.url_id and u.live = ?"
        );

        let clause = left_join(col_as("tags", "t"), [eq(col("t.id"), col("ut.tag_id"))]);
        assert_eq!(clause.to_sql(), "left join tags as 't' on t.id = ut.tag_id");
    }

    #[test]
    fn test_join_without_predicates_skips_on() {
        assert_eq!(join("b", Vec::<Expr>::new()).to_sql(), "join b");
    }

    #[test]
    fn test_where_is_one_parenthesized_group() {
        let clause = where_([eq(col("a"), placeholder()), eq(col("b"), placeholder())]);
        assert_eq!(clause.to_sql(), "(a = ? and b = ?)");
    }

    #[test]
    fn test_group_and_order_by() {
        assert_eq!(group_by(["uu.id", "t.id"]).to_sql(), "group by uu.id, t.id");
        assert_eq!(
            order_by([col("created_at"), desc("id")]).to_sql(),
            "order by created_at, id desc"
        );

        let mut body = String::new();
        order_by(["a"]).write_body(&mut body);
        assert_eq!(body, "a");
    }

    #[test]
    fn test_from_subselect_alias() {
        let sub = select(col("id"), [from(["t"])]);
        assert_eq!(
            from_subselect(sub.clone(), "s").to_sql(),
            "(select id from t) as 's'"
        );
        assert_eq!(from_subselect(sub, "").to_sql(), "(select id from t)");
    }

    #[test]
    fn test_is_empty() {
        assert!(from(Vec::<Expr>::new()).is_empty());
        assert!(where_(Vec::<Expr>::new()).is_empty());
        assert!(join("t", Vec::<Expr>::new()).is_empty());
        assert!(!group_by(["a"]).is_empty());
    }
}
