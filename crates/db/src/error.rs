//! Errors raised by transactional writes.

use std::fmt;

/// The statement inside a write transaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    InsertProject,
    UpdateProject,
    DeleteLinks,
    InsertLinks,
    DeleteProject,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteStep::InsertProject => "insert project",
            WriteStep::UpdateProject => "update project",
            WriteStep::DeleteLinks => "delete technology links",
            WriteStep::InsertLinks => "insert technology links",
            WriteStep::DeleteProject => "delete project",
        };
        f.write_str(label)
    }
}

/// Failure of a multi-statement write.
///
/// By the time a caller sees one of these, the transaction has already been
/// rolled back (or was never opened).
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to start transaction: {0}")]
    TransactionStart(#[source] sqlx::Error),

    #[error("Failed to {step}: {source}")]
    Write {
        step: WriteStep,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
}

impl WriteError {
    /// Build a `map_err` adapter tagging a sqlx error with its step.
    pub(crate) fn at(step: WriteStep) -> impl FnOnce(sqlx::Error) -> WriteError {
        move |source| WriteError::Write { step, source }
    }

    /// The underlying database error.
    pub fn sqlx_error(&self) -> &sqlx::Error {
        match self {
            WriteError::TransactionStart(e) | WriteError::Commit(e) => e,
            WriteError::Write { source, .. } => source,
        }
    }

    /// PostgreSQL SQLSTATE of the underlying error, if the server sent one.
    pub fn sqlstate(&self) -> Option<String> {
        match self.sqlx_error() {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    /// True when a link insert referenced a technology that does not exist.
    pub fn is_unknown_technology(&self) -> bool {
        matches!(
            self,
            WriteError::Write {
                step: WriteStep::InsertLinks,
                ..
            }
        ) && self.sqlstate().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }
}

/// SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
