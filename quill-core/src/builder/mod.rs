//! Clauses and the statement assembler

pub mod clause;
pub mod select;

// Re-export types from submodules
pub use clause::{
    from, from_subselect, group_by, join, left_join, order_by, where_, Clause, ClauseKind,
};
pub use select::{select, MergePolicy, Statement, StatementKind};
