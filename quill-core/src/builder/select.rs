//! SELECT statement assembly

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Expression};
use crate::{Error, Result};

use super::clause::{Clause, ClauseKind};

/// The statement kinds the assembler knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatementKind {
    Select,
}

impl StatementKind {
    pub fn keyword(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
        }
    }

    /// How clauses of `kind` are merged when a statement of this kind holds
    /// more than one of them
    pub fn merge_policy(self, kind: ClauseKind) -> MergePolicy {
        match (self, kind) {
            (StatementKind::Select, ClauseKind::Join | ClauseKind::LeftJoin) => {
                MergePolicy::KeywordPerOccurrence
            }
            (
                StatementKind::Select,
                ClauseKind::From | ClauseKind::Where | ClauseKind::GroupBy | ClauseKind::OrderBy,
            ) => MergePolicy::KeywordOnce,
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Keyword placement for a group of same-kind clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// The keyword is written once, followed by every clause body
    KeywordOnce,
    /// Each clause is written in full, keyword included
    KeywordPerOccurrence,
}

/// A complete statement: projection expressions plus clauses in the order
/// they were added.
///
/// Clause order does not matter for rendering; clauses are grouped by kind
/// and written in [`ClauseKind`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statement {
    kind: StatementKind,
    expressions: Vec<Expr>,
    clauses: Vec<Clause>,
}

/// Build a select statement from a projection and its clauses
///
/// # Examples
/// ```
/// use quill_core::{col, columns, eq, from, order_by, placeholder, select, where_, Expression};
///
/// let query = select(
///     columns([col("*")]),
///     [
///         from([col("items")]),
///         where_([eq(col("id"), placeholder())]),
///         order_by(["created_at"]),
///     ],
/// );
/// assert_eq!(
///     query.to_sql(),
///     "select * from items where (id = ?) order by created_at"
/// );
/// ```
pub fn select<I>(columns: impl Into<Expr>, clauses: I) -> Statement
where
    I: IntoIterator<Item = Clause>,
{
    let mut statement = Statement::new(StatementKind::Select, [columns.into()]);
    statement.clauses.extend(clauses);
    statement
}

impl Statement {
    /// Create a statement with no clauses
    pub fn new<I>(kind: StatementKind, expressions: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
    {
        Self {
            kind,
            expressions: expressions.into_iter().collect(),
            clauses: Vec::new(),
        }
    }

    /// Append a clause
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Append a clause in place
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn expressions(&self) -> &[Expr] {
        &self.expressions
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Check the statement for structural mistakes.
    ///
    /// Rendering does not depend on this; a statement that fails validation
    /// still renders.
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(err) = &result {
            tracing::debug!(kind = %self.kind, error = %err, "statement failed validation");
        }
        result
    }

    fn check(&self) -> Result<()> {
        if self.expressions.iter().all(Expr::is_empty) {
            return Err(Error::EmptyProjection);
        }

        let has_table = self
            .clauses
            .iter()
            .any(|clause| clause.kind() == ClauseKind::From);

        for clause in &self.clauses {
            let kind = clause.kind();
            if clause.is_empty() {
                return Err(Error::empty_clause(kind));
            }
            if !has_table && kind != ClauseKind::From {
                return Err(Error::missing_table(kind));
            }
        }

        let mut nested = Vec::new();
        for expr in &self.expressions {
            expr.nested_statements(&mut nested);
        }
        for clause in &self.clauses {
            clause.nested_statements(&mut nested);
        }
        for statement in nested {
            statement.check().map_err(Error::subselect)?;
        }

        Ok(())
    }
}

impl Expression for Statement {
    fn write_sql(&self, out: &mut String) {
        tracing::trace!(
            kind = %self.kind,
            expressions = self.expressions.len(),
            clauses = self.clauses.len(),
            "rendering statement"
        );

        let start = out.len();
        let mut groups: [Vec<&Clause>; ClauseKind::COUNT] = std::array::from_fn(|_| Vec::new());

        out.push_str(self.kind.keyword());
        out.push(' ');

        for expr in &self.expressions {
            expr.write_sql(out);
            out.push(' ');
        }

        for clause in &self.clauses {
            groups[clause.kind().index()].push(clause);
        }

        for kind in ClauseKind::ALL {
            let group = &groups[kind.index()];
            if group.is_empty() {
                continue;
            }

            let policy = self.kind.merge_policy(kind);
            if policy == MergePolicy::KeywordOnce {
                out.push_str(kind.keyword());
                out.push(' ');
            }

            for (i, clause) in group.iter().enumerate() {
                if i > 0 {
                    out.push_str(kind.delimiter());
                }
                match policy {
                    MergePolicy::KeywordOnce => clause.write_body(out),
                    MergePolicy::KeywordPerOccurrence => clause.write_sql(out),
                }
            }
            out.push(' ');
        }

        let end = start + out[start..].trim_end().len();
        out.truncate(end);
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
