//! Quill Core - composable SQL select statements
//!
//! Statements are assembled from small values: expressions ([`Expr`]) for
//! columns, tables and predicates, and clauses ([`Clause`]) that a
//! [`Statement`] groups by kind and renders in SQL clause order.
//!
//! ```
//! use quill_core::{col, col_as, eq, from, join, placeholder, select, where_, Expression};
//!
//! let query = select(
//!     col("u.name"),
//!     [
//!         where_([eq(col("u.id"), placeholder())]),
//!         join(col_as("orgs", "o"), [eq(col("o.id"), col("u.org_id"))]),
//!         from([col_as("users", "u")]),
//!     ],
//! );
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "select u.name from users as 'u' join orgs as 'o' on o.id = u.org_id where (u.id = ?)"
//! );
//! ```

pub mod builder;
pub mod error;
pub mod expr;
pub mod operator;

// Re-export main types
pub use builder::{
    from, from_subselect, group_by, join, left_join, order_by, select, where_, Clause,
    ClauseKind, MergePolicy, Statement, StatementKind,
};
pub use error::{Error, Result};
pub use expr::{
    alias, asc, between, col, col_as, columns, constant, desc, eq, func, gt, gte, in_,
    is_not_null, is_null, like, list, lt, lte, not_like, placeholder, predicate, subselect,
    window, wrap, Expr, Expression, SortDirection, DEFAULT_DELIMITER, PLACEHOLDER,
};
pub use operator::{op, IntoOperator, Operator};
