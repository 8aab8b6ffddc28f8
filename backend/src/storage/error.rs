use crate::domain::models::EntityKind;

/// Failures reported by a record store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },
    /// Insert or update pointed at a parent that does not exist
    #[error("referenced {kind} {id} does not exist")]
    MissingReference { kind: EntityKind, id: i64 },
    /// Remove refused because child records still point at the row
    #[error("{kind} {id} still has {dependent} records")]
    HasDependents {
        kind: EntityKind,
        id: i64,
        dependent: EntityKind,
    },
    /// Compare-and-set on an appointment status lost the race
    #[error("appointment {id} status changed concurrently")]
    StaleStatus { id: i64 },
    #[error("stored {kind} row is unreadable: {detail}")]
    Corrupt { kind: EntityKind, detail: String },
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

impl StorageError {
    /// True when the database rejected a statement because of a foreign key
    pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.is_foreign_key_violation(),
            _ => false,
        }
    }
}
