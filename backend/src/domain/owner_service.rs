use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::owner::{CreateOwnerCommand, OwnerDraft, UpdateOwnerCommand};
use crate::domain::errors::{ConflictReason, DomainError};
use crate::domain::models::{EntityKind, Owner, OwnerRecord};
use crate::domain::validation::{Validator, MAX_NAME_LEN, MAX_PHONE_LEN};
use crate::storage::traits::OwnerStorage;

/// Service for managing clinic clients
#[derive(Clone)]
pub struct OwnerService {
    owners: Arc<dyn OwnerStorage>,
}

impl OwnerService {
    pub fn new(owners: Arc<dyn OwnerStorage>) -> Self {
        Self { owners }
    }

    fn validate(draft: &OwnerDraft) -> Result<OwnerRecord, DomainError> {
        let mut v = Validator::new();
        let record = OwnerRecord {
            first_name: v.required_text("firstName", &draft.first_name, MAX_NAME_LEN),
            last_name: v.required_text("lastName", &draft.last_name, MAX_NAME_LEN),
            phone: v.required_text("phone", &draft.phone, MAX_PHONE_LEN),
            email: v.email("email", &draft.email),
        };
        v.finish()?;
        Ok(record)
    }

    /// Create a new owner; new owners start with no pets
    pub async fn create_owner(&self, command: CreateOwnerCommand) -> Result<Owner, DomainError> {
        info!("Creating owner: {} {}", command.first_name, command.last_name);

        let record = Self::validate(&command).map_err(|e| {
            warn!("Rejected owner: {}", e);
            e
        })?;
        let owner = self.owners.insert_owner(&record, Utc::now()).await?;

        info!("Created owner: {} with ID: {}", owner.full_name(), owner.id);
        Ok(owner)
    }

    pub async fn get_owner(&self, owner_id: i64) -> Result<Owner, DomainError> {
        info!("Getting owner: {}", owner_id);

        self.owners
            .find_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Owner, owner_id))
    }

    pub async fn list_owners(&self) -> Result<Vec<Owner>, DomainError> {
        info!("Listing all owners");

        let owners = self.owners.list_owners().await?;
        info!("Found {} owners", owners.len());
        Ok(owners)
    }

    /// Replace every editable field of an owner
    pub async fn update_owner(&self, owner_id: i64, command: UpdateOwnerCommand) -> Result<Owner, DomainError> {
        info!("Updating owner: {}", owner_id);

        let record = Self::validate(&command).map_err(|e| {
            warn!("Rejected update of owner {}: {}", owner_id, e);
            e
        })?;
        let owner = self.owners.save_owner(owner_id, &record).await?;

        info!("Updated owner: {} with ID: {}", owner.full_name(), owner.id);
        Ok(owner)
    }

    /// Delete an owner that has no pets left
    pub async fn delete_owner(&self, owner_id: i64) -> Result<(), DomainError> {
        info!("Deleting owner: {}", owner_id);

        let pets = self.owners.count_pets(owner_id).await?;
        if pets > 0 {
            warn!("Refusing to delete owner {}: {} pets still registered", owner_id, pets);
            return Err(ConflictReason::HasDependents {
                kind: EntityKind::Owner,
                id: owner_id,
                dependent: EntityKind::Pet,
            }
            .into());
        }

        // the store repeats the check inside its delete transaction
        self.owners.remove_owner(owner_id).await?;

        info!("Deleted owner: {}", owner_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationIssue;
    use crate::domain::models::PetRecord;
    use crate::storage::traits::PetStorage;
    use crate::storage::{DbConnection, OwnerRepository, PetRepository};
    use chrono::NaiveDate;
    use shared::{ErrorKind, Species};

    async fn setup_test() -> (OwnerService, PetRepository) {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let service = OwnerService::new(Arc::new(OwnerRepository::new(db.clone())));
        (service, PetRepository::new(db))
    }

    fn juan() -> OwnerDraft {
        OwnerDraft {
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            phone: "999888777".to_string(),
            email: "juan@mail.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_owner() {
        let (service, _pets) = setup_test().await;

        let owner = service.create_owner(juan()).await.expect("Failed to create owner");

        assert!(owner.id > 0);
        assert_eq!(owner.full_name(), "Juan Pérez");
        assert_eq!(owner.pet_count, 0);
        assert_eq!(service.get_owner(owner.id).await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_create_owner_trims_input() {
        let (service, _pets) = setup_test().await;
        let mut draft = juan();
        draft.first_name = "  Juan ".to_string();
        draft.email = " juan@mail.com ".to_string();

        let owner = service.create_owner(draft).await.unwrap();
        assert_eq!(owner.first_name, "Juan");
        assert_eq!(owner.email, "juan@mail.com");
    }

    #[tokio::test]
    async fn test_create_owner_reports_every_issue() {
        let (service, _pets) = setup_test().await;
        let draft = OwnerDraft {
            first_name: "".to_string(),
            last_name: "Pérez".to_string(),
            phone: " ".to_string(),
            email: "juan-at-mail".to_string(),
        };

        let err = service.create_owner(draft).await.unwrap_err();
        match err {
            DomainError::Validation(issues) => assert_eq!(
                issues,
                vec![
                    ValidationIssue::Required("firstName"),
                    ValidationIssue::Required("phone"),
                    ValidationIssue::InvalidEmail {
                        field: "email",
                        value: "juan-at-mail".to_string()
                    },
                ]
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.list_owners().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let (service, _pets) = setup_test().await;
        let owner = service.create_owner(juan()).await.unwrap();

        let draft = OwnerDraft {
            first_name: "María".to_string(),
            last_name: "Gómez".to_string(),
            phone: "111222333".to_string(),
            email: "maria@mail.com".to_string(),
        };
        service.update_owner(owner.id, draft.clone()).await.expect("Failed to update owner");

        let found = service.get_owner(owner.id).await.unwrap();
        assert_eq!(found.first_name, draft.first_name);
        assert_eq!(found.last_name, draft.last_name);
        assert_eq!(found.phone, draft.phone);
        assert_eq!(found.email, draft.email);
        assert_eq!(found.full_name(), "María Gómez");
        assert_eq!(found.created_at, owner.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_owner() {
        let (service, _pets) = setup_test().await;
        let err = service.update_owner(41, juan()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_with_invalid_draft_leaves_owner_untouched() {
        let (service, _pets) = setup_test().await;
        let owner = service.create_owner(juan()).await.unwrap();

        let mut draft = juan();
        draft.email = "broken".to_string();
        let err = service.update_owner(owner.id, draft).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(service.get_owner(owner.id).await.unwrap().email, "juan@mail.com");
    }

    #[tokio::test]
    async fn test_delete_owner_guarded_by_pets() {
        let (service, pets) = setup_test().await;
        let owner = service.create_owner(juan()).await.unwrap();
        let pet = pets
            .insert_pet(
                owner.id,
                &PetRecord {
                    name: "Max".to_string(),
                    species: Species::Dog,
                    breed: "Labrador".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let err = service.delete_owner(owner.id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictReason::HasDependents { dependent: EntityKind::Pet, .. })
        ));
        assert_eq!(service.get_owner(owner.id).await.unwrap().pet_count, 1);

        pets.remove_pet(pet.id).await.unwrap();
        service.delete_owner(owner.id).await.expect("Failed to delete owner");

        let err = service.get_owner(owner.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { kind: EntityKind::Owner, .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_owner() {
        let (service, _pets) = setup_test().await;
        let err = service.delete_owner(8).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
