//! # Storage Traits
//!
//! The record store contract the domain layer is written against. One trait
//! per entity; each exposes find / list / insert / save / remove plus the
//! child count used by the referential integrity guard.
//!
//! `remove_*` implementations must check for children and delete in one
//! atomic step, and fail with [`StorageError::HasDependents`] instead of
//! cascading.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::AppointmentStatus;

use crate::domain::models::{Appointment, AppointmentRecord, Owner, OwnerRecord, Pet, PetRecord};
use crate::storage::StorageError;

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait OwnerStorage: Send + Sync {
    /// Store a new owner and return it with its assigned id
    async fn insert_owner(&self, record: &OwnerRecord, created_at: DateTime<Utc>) -> StorageResult<Owner>;

    async fn find_owner(&self, owner_id: i64) -> StorageResult<Option<Owner>>;

    /// All owners ordered by last name, then first name
    async fn list_owners(&self) -> StorageResult<Vec<Owner>>;

    /// Overwrite the editable fields of an existing owner
    async fn save_owner(&self, owner_id: i64, record: &OwnerRecord) -> StorageResult<Owner>;

    async fn remove_owner(&self, owner_id: i64) -> StorageResult<()>;

    async fn count_pets(&self, owner_id: i64) -> StorageResult<u32>;
}

#[async_trait]
pub trait PetStorage: Send + Sync {
    /// Store a new pet under `owner_id`; fails with `MissingReference` if the owner is gone
    async fn insert_pet(&self, owner_id: i64, record: &PetRecord, created_at: DateTime<Utc>) -> StorageResult<Pet>;

    async fn find_pet(&self, pet_id: i64) -> StorageResult<Option<Pet>>;

    /// Pets ordered by name, optionally restricted to one owner
    async fn list_pets(&self, owner_id: Option<i64>) -> StorageResult<Vec<Pet>>;

    /// Overwrite the editable fields of an existing pet; the owner is untouched
    async fn save_pet(&self, pet_id: i64, record: &PetRecord) -> StorageResult<Pet>;

    async fn remove_pet(&self, pet_id: i64) -> StorageResult<()>;

    async fn count_appointments(&self, pet_id: i64) -> StorageResult<u32>;
}

#[async_trait]
pub trait AppointmentStorage: Send + Sync {
    /// Store a new appointment for `pet_id`; fails with `MissingReference` if the pet is gone
    async fn insert_appointment(
        &self,
        pet_id: i64,
        record: &AppointmentRecord,
        created_at: DateTime<Utc>,
    ) -> StorageResult<Appointment>;

    async fn find_appointment(&self, appointment_id: i64) -> StorageResult<Option<Appointment>>;

    /// Appointments ordered by date, optionally restricted to one pet
    async fn list_appointments(&self, pet_id: Option<i64>) -> StorageResult<Vec<Appointment>>;

    /// Overwrite the editable fields, but only while the stored status is
    /// still `expected_status`; otherwise fails with `StaleStatus`
    async fn save_appointment(
        &self,
        appointment_id: i64,
        record: &AppointmentRecord,
        expected_status: AppointmentStatus,
    ) -> StorageResult<Appointment>;

    async fn remove_appointment(&self, appointment_id: i64) -> StorageResult<()>;
}
