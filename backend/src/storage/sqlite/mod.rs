//! # SQLite Storage
//!
//! SQLite-backed implementations of the storage traits. All repositories
//! share one [`DbConnection`](crate::storage::DbConnection).

pub mod appointment_repository;
pub mod owner_repository;
pub mod pet_repository;

pub use appointment_repository::AppointmentRepository;
pub use owner_repository::OwnerRepository;
pub use pet_repository::PetRepository;

use crate::domain::models::EntityKind;
use crate::storage::traits::StorageResult;
use crate::storage::StorageError;

/// Narrow a SQLite `COUNT(*)` to the domain's child count
pub(crate) fn child_count(kind: EntityKind, raw: i64) -> StorageResult<u32> {
    u32::try_from(raw).map_err(|_| StorageError::Corrupt {
        kind,
        detail: format!("child count {} out of range", raw),
    })
}
