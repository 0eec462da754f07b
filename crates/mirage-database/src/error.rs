//! Store adapter boundary.
//!
//! Every failure coming out of sqlx is classified into a closed set of
//! outcomes before any repository decides what it means for the domain.
//! Classification uses the structured error kind reported by the driver,
//! never the message text.

use sqlx::error::ErrorKind as DbErrorKind;
use thiserror::Error;

use mirage_core::error::{AppError, ErrorKind};

/// Which integrity rule a write broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

/// Tagged outcome of a failed store call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A query that expects exactly one row found none.
    #[error("row not found")]
    NotFound,

    /// The write violated an integrity constraint.
    #[error("{kind:?} constraint violated ({})", constraint.as_deref().unwrap_or("unnamed"))]
    ConstraintViolation {
        kind: Constraint,
        /// Constraint name as reported by the store, when available.
        constraint: Option<String>,
    },

    /// Anything else: connectivity, protocol, decoding, pool exhaustion.
    #[error(transparent)]
    Other(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(ref db_err) => {
                let kind = match db_err.kind() {
                    DbErrorKind::UniqueViolation => Constraint::Unique,
                    DbErrorKind::ForeignKeyViolation => Constraint::ForeignKey,
                    DbErrorKind::CheckViolation => Constraint::Check,
                    DbErrorKind::NotNullViolation => Constraint::NotNull,
                    _ => return Self::Other(err),
                };
                Self::ConstraintViolation {
                    kind,
                    constraint: db_err.constraint().map(str::to_string),
                }
            }
            other => Self::Other(other),
        }
    }
}

impl StoreError {
    /// A unique violation on a named constraint, as produced by the store.
    pub fn unique(constraint: &str) -> Self {
        Self::ConstraintViolation {
            kind: Constraint::Unique,
            constraint: Some(constraint.to_string()),
        }
    }

    /// A foreign-key violation on a named constraint.
    pub fn foreign_key(constraint: &str) -> Self {
        Self::ConstraintViolation {
            kind: Constraint::ForeignKey,
            constraint: Some(constraint.to_string()),
        }
    }

    /// Whether this is a violation of the named constraint.
    pub fn violates(&self, name: &str) -> bool {
        matches!(self, Self::ConstraintViolation { constraint: Some(c), .. } if c == name)
    }

    /// Default mapping to the domain error set. `context` describes the
    /// operation and becomes the message.
    pub fn into_app(self, context: &str) -> AppError {
        match self {
            Self::NotFound => AppError::not_found(context),
            Self::ConstraintViolation {
                kind: Constraint::Unique,
                ..
            } => AppError::conflict(context),
            Self::ConstraintViolation {
                kind: Constraint::ForeignKey,
                ..
            } => AppError::not_found(context),
            Self::ConstraintViolation { .. } => AppError::validation(context),
            Self::Other(err) => AppError::with_source(ErrorKind::Internal, context, err),
        }
    }
}

/// Classify and map a raw sqlx error in one step.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| StoreError::from(err).into_app(context)
}
