//! Error types for statement validation
//!
//! Rendering itself never fails; these errors are only produced by
//! [`Statement::validate`](crate::Statement::validate).

use thiserror::Error;

use crate::builder::ClauseKind;

/// The main error type for quill operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The statement projects nothing
    #[error("Statement has no projected columns")]
    EmptyProjection,

    /// A clause was added without any items to render
    #[error("Empty '{kind}' clause")]
    EmptyClause { kind: ClauseKind },

    /// A clause that needs a table was added to a statement with no from clause
    #[error("'{kind}' clause requires a from clause")]
    MissingTable { kind: ClauseKind },

    /// A nested statement failed validation
    #[error("Invalid subselect: {0}")]
    Subselect(#[source] Box<Error>),
}

/// Convenience Result type for quill operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new empty clause error
    pub fn empty_clause(kind: ClauseKind) -> Self {
        Self::EmptyClause { kind }
    }

    /// Create a new missing table error
    pub fn missing_table(kind: ClauseKind) -> Self {
        Self::MissingTable { kind }
    }

    /// Wrap an error raised by a nested statement
    pub fn subselect(source: Error) -> Self {
        Self::Subselect(Box::new(source))
    }
}
