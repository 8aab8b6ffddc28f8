//! # Domain errors
//!
//! Every service operation returns `Result<T, DomainError>`. The variants map
//! one-to-one onto what a caller can do about the failure: fix the input,
//! pick another record, resolve the dependency, or retry later.

use std::fmt;

use shared::{AppointmentStatus, ErrorKind};

use crate::domain::models::EntityKind;
use crate::storage::StorageError;

/// A single problem found in a create or update payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} '{value}' is not a valid email address")]
    InvalidEmail { field: &'static str, value: String },
    #[error("{field} '{value}' is not a valid date")]
    InvalidDate { field: &'static str, value: String },
    #[error("{0} cannot be in the future")]
    InFuture(&'static str),
    #[error("{0} cannot be in the past")]
    InPast(&'static str),
    #[error("{field} must be on or after year {min_year}")]
    TooOld { field: &'static str, min_year: i32 },
    #[error("'{0}' is not a known species")]
    UnknownSpecies(String),
    #[error("'{0}' is not a known appointment status")]
    UnknownStatus(String),
    #[error("{0} cannot be changed")]
    Immutable(&'static str),
}

/// Why an otherwise valid request was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// The record still has dependent children
    HasDependents {
        kind: EntityKind,
        id: i64,
        dependent: EntityKind,
    },
    /// The appointment already reached a final status
    TerminalStatus { id: i64, status: AppointmentStatus },
    /// The appointment status changed between read and write
    StatusChanged { id: i64 },
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::HasDependents { kind, id, dependent } => {
                write!(f, "cannot delete {} {}: it has associated {}s", kind, id, dependent)
            }
            ConflictReason::TerminalStatus { id, status } => {
                write!(f, "appointment {} is already {} and cannot change status", id, status)
            }
            ConflictReason::StatusChanged { id } => {
                write!(f, "appointment {} was modified by another request", id)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("{0}")]
    Conflict(ConflictReason),
    #[error("record store unavailable")]
    Transport(#[source] StorageError),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        DomainError::NotFound { kind, id }
    }

    /// The failure category exposed to API clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Transport failures are the only ones worth retrying unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Transport(_))
    }
}

impl From<ConflictReason> for DomainError {
    fn from(reason: ConflictReason) -> Self {
        DomainError::Conflict(reason)
    }
}

/// Translates persistence-side outcomes into domain outcomes
impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { kind, id } => DomainError::NotFound { kind, id },
            StorageError::MissingReference { kind, id } => DomainError::NotFound { kind, id },
            StorageError::HasDependents { kind, id, dependent } => {
                DomainError::Conflict(ConflictReason::HasDependents { kind, id, dependent })
            }
            StorageError::StaleStatus { id } => {
                DomainError::Conflict(ConflictReason::StatusChanged { id })
            }
            other => DomainError::Transport(other),
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
