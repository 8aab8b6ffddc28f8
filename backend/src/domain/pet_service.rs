use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::commands::pet::{CreatePetCommand, UpdatePetCommand};
use crate::domain::errors::{ConflictReason, DomainError};
use crate::domain::models::{EntityKind, Owner, Pet, PetRecord};
use crate::domain::validation::{Validator, MAX_NAME_LEN};
use crate::storage::traits::{OwnerStorage, PetStorage};

/// Service for managing pets and their link to an owner
#[derive(Clone)]
pub struct PetService {
    pets: Arc<dyn PetStorage>,
    owners: Arc<dyn OwnerStorage>,
}

impl PetService {
    pub fn new(pets: Arc<dyn PetStorage>, owners: Arc<dyn OwnerStorage>) -> Self {
        Self { pets, owners }
    }

    fn validate_fields(
        v: &mut Validator,
        name: &str,
        species: &str,
        breed: &str,
        birth_date: &str,
        today: NaiveDate,
    ) -> Option<PetRecord> {
        let name = v.required_text("name", name, MAX_NAME_LEN);
        let species = v.species("species", species);
        let breed = v.required_text("breed", breed, MAX_NAME_LEN);
        let birth_date = v.birth_date("birthDate", birth_date, today);
        Some(PetRecord {
            name,
            species: species?,
            breed,
            birth_date: birth_date?,
        })
    }

    async fn require_owner(&self, owner_id: i64) -> Result<Owner, DomainError> {
        self.owners
            .find_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Owner, owner_id))
    }

    /// Register a pet under an existing owner
    pub async fn create_pet(&self, command: CreatePetCommand) -> Result<Pet, DomainError> {
        info!("Creating pet: name={}, owner={}", command.name, command.owner_id);

        let today = Local::now().date_naive();
        let mut v = Validator::new();
        let record = Self::validate_fields(
            &mut v,
            &command.name,
            &command.species,
            &command.breed,
            &command.birth_date,
            today,
        );
        let owner_id = v.reference("ownerId", command.owner_id);
        let (Some(record), Some(owner_id)) = (record, owner_id) else {
            let err = v.into_error();
            warn!("Rejected pet: {}", err);
            return Err(err);
        };
        v.finish().map_err(|err| {
            warn!("Rejected pet: {}", err);
            err
        })?;

        let owner = self.require_owner(owner_id).await?;
        let pet = self.pets.insert_pet(owner.id, &record, Utc::now()).await?;

        info!("Created pet: {} with ID: {} for owner {}", pet.name, pet.id, owner.id);
        Ok(pet)
    }

    pub async fn get_pet(&self, pet_id: i64) -> Result<Pet, DomainError> {
        info!("Getting pet: {}", pet_id);

        self.pets
            .find_pet(pet_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Pet, pet_id))
    }

    pub async fn list_pets(&self) -> Result<Vec<Pet>, DomainError> {
        info!("Listing all pets");

        let pets = self.pets.list_pets(None).await?;
        info!("Found {} pets", pets.len());
        Ok(pets)
    }

    /// Pets of one owner; an unknown owner is an error, not an empty list
    pub async fn list_pets_by_owner(&self, owner_id: i64) -> Result<Vec<Pet>, DomainError> {
        info!("Listing pets of owner: {}", owner_id);

        self.require_owner(owner_id).await?;
        let pets = self.pets.list_pets(Some(owner_id)).await?;
        info!("Found {} pets for owner {}", pets.len(), owner_id);
        Ok(pets)
    }

    /// Update name, species, breed and birth date. The owner stays fixed.
    pub async fn update_pet(&self, pet_id: i64, command: UpdatePetCommand) -> Result<Pet, DomainError> {
        info!("Updating pet: {}", pet_id);

        let current = self.get_pet(pet_id).await?;

        let today = Local::now().date_naive();
        let mut v = Validator::new();
        let record = Self::validate_fields(
            &mut v,
            &command.name,
            &command.species,
            &command.breed,
            &command.birth_date,
            today,
        );
        v.unchanged("ownerId", command.owner_id, current.owner_id);
        let Some(record) = record else {
            let err = v.into_error();
            warn!("Rejected update of pet {}: {}", pet_id, err);
            return Err(err);
        };
        v.finish().map_err(|err| {
            warn!("Rejected update of pet {}: {}", pet_id, err);
            err
        })?;

        let pet = self.pets.save_pet(pet_id, &record).await?;

        info!("Updated pet: {} with ID: {}", pet.name, pet.id);
        Ok(pet)
    }

    /// Delete a pet that has no appointments, whatever their status
    pub async fn delete_pet(&self, pet_id: i64) -> Result<(), DomainError> {
        info!("Deleting pet: {}", pet_id);

        let appointments = self.pets.count_appointments(pet_id).await?;
        if appointments > 0 {
            warn!("Refusing to delete pet {}: {} appointments on record", pet_id, appointments);
            return Err(ConflictReason::HasDependents {
                kind: EntityKind::Pet,
                id: pet_id,
                dependent: EntityKind::Appointment,
            }
            .into());
        }

        self.pets.remove_pet(pet_id).await?;

        info!("Deleted pet: {}", pet_id);
        Ok(())
    }
}
