use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::Species;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{EntityKind, Pet, PetRecord};
use crate::storage::sqlite::child_count;
use crate::storage::traits::{PetStorage, StorageResult};
use crate::storage::{DbConnection, StorageError};

const SELECT_PET: &str = r#"
    SELECT p.id, p.name, p.species, p.breed, p.birth_date, p.created_at, p.owner_id,
           o.first_name || ' ' || o.last_name AS owner_name
    FROM pets p
    JOIN owners o ON o.id = p.owner_id
"#;

/// Repository for pet operations
#[derive(Clone)]
pub struct PetRepository {
    db: DbConnection,
}

impl PetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn pet_from_row(row: &SqliteRow) -> StorageResult<Pet> {
        let species: String = row.try_get("species")?;
        let species = species.parse::<Species>().map_err(|e| StorageError::Corrupt {
            kind: EntityKind::Pet,
            detail: e.to_string(),
        })?;

        Ok(Pet {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            species,
            breed: row.try_get("breed")?,
            birth_date: row.try_get("birth_date")?,
            created_at: row.try_get("created_at")?,
            owner_id: row.try_get("owner_id")?,
            owner_name: row.try_get("owner_name")?,
        })
    }

    async fn load(&self, pet_id: i64) -> StorageResult<Pet> {
        self.find_pet(pet_id)
            .await?
            .ok_or(StorageError::NotFound { kind: EntityKind::Pet, id: pet_id })
    }
}

#[async_trait]
impl PetStorage for PetRepository {
    async fn insert_pet(&self, owner_id: i64, record: &PetRecord, created_at: DateTime<Utc>) -> StorageResult<Pet> {
        let result = sqlx::query(
            r#"
            INSERT INTO pets (name, species, breed, birth_date, created_at, owner_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(record.species.as_str())
        .bind(&record.breed)
        .bind(record.birth_date)
        .bind(created_at)
        .bind(owner_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| {
            if StorageError::is_foreign_key_violation(&e) {
                StorageError::MissingReference { kind: EntityKind::Owner, id: owner_id }
            } else {
                e.into()
            }
        })?;

        self.load(result.last_insert_rowid()).await
    }

    async fn find_pet(&self, pet_id: i64) -> StorageResult<Option<Pet>> {
        let row = sqlx::query(&format!("{} WHERE p.id = ?", SELECT_PET))
            .bind(pet_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::pet_from_row).transpose()
    }

    async fn list_pets(&self, owner_id: Option<i64>) -> StorageResult<Vec<Pet>> {
        let rows = match owner_id {
            Some(owner_id) => {
                sqlx::query(&format!("{} WHERE p.owner_id = ? ORDER BY p.name ASC, p.id ASC", SELECT_PET))
                    .bind(owner_id)
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                sqlx::query(&format!("{} ORDER BY p.name ASC, p.id ASC", SELECT_PET))
                    .fetch_all(self.db.pool())
                    .await?
            }
        };

        rows.iter().map(Self::pet_from_row).collect()
    }

    async fn save_pet(&self, pet_id: i64, record: &PetRecord) -> StorageResult<Pet> {
        let result = sqlx::query(
            r#"
            UPDATE pets
            SET name = ?, species = ?, breed = ?, birth_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.name)
        .bind(record.species.as_str())
        .bind(&record.breed)
        .bind(record.birth_date)
        .bind(pet_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { kind: EntityKind::Pet, id: pet_id });
        }

        self.load(pet_id).await
    }

    async fn remove_pet(&self, pet_id: i64) -> StorageResult<()> {
        let mut tx = self.db.pool().begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM pets WHERE id = ?")
            .bind(pet_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StorageError::NotFound { kind: EntityKind::Pet, id: pet_id });
        }

        // any appointment blocks the delete, whatever its status
        let appointments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE pet_id = ?")
            .bind(pet_id)
            .fetch_one(&mut *tx)
            .await?;
        let has_dependents = StorageError::HasDependents {
            kind: EntityKind::Pet,
            id: pet_id,
            dependent: EntityKind::Appointment,
        };
        if appointments > 0 {
            return Err(has_dependents);
        }

        match sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(pet_id)
            .execute(&mut *tx)
            .await
        {
            Ok(_) => {}
            Err(e) if StorageError::is_foreign_key_violation(&e) => return Err(has_dependents),
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count_appointments(&self, pet_id: i64) -> StorageResult<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE pet_id = ?")
            .bind(pet_id)
            .fetch_one(self.db.pool())
            .await?;
        child_count(EntityKind::Pet, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::models::OwnerRecord;
    use crate::storage::sqlite::OwnerRepository;
    use crate::storage::traits::OwnerStorage;

    async fn setup_test() -> (PetRepository, i64) {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let owners = OwnerRepository::new(db.clone());
        let owner = owners
            .insert_owner(
                &OwnerRecord {
                    first_name: "Juan".to_string(),
                    last_name: "Pérez".to_string(),
                    phone: "999888777".to_string(),
                    email: "juan@mail.com".to_string(),
                },
                Utc::now(),
            )
            .await
            .expect("Failed to insert owner");
        (PetRepository::new(db), owner.id)
    }

    fn record(name: &str, species: Species) -> PetRecord {
        PetRecord {
            name: name.to_string(),
            species,
            breed: "Mestizo".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_denormalizes_owner_name() {
        let (repo, owner_id) = setup_test().await;

        let pet = repo.insert_pet(owner_id, &record("Max", Species::Dog), Utc::now()).await.expect("Failed to insert pet");

        assert!(pet.id > 0);
        assert_eq!(pet.owner_id, owner_id);
        assert_eq!(pet.owner_name, "Juan Pérez");
        assert_eq!(pet.species, Species::Dog);
        assert_eq!(pet.birth_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_insert_under_missing_owner() {
        let (repo, _owner_id) = setup_test().await;

        let err = repo.insert_pet(999, &record("Max", Species::Dog), Utc::now()).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingReference { kind: EntityKind::Owner, id: 999 }));
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let (repo, owner_id) = setup_test().await;
        repo.insert_pet(owner_id, &record("Toby", Species::Dog), Utc::now()).await.unwrap();
        repo.insert_pet(owner_id, &record("Luna", Species::Cat), Utc::now()).await.unwrap();

        let all = repo.list_pets(None).await.expect("Failed to list pets");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Luna");
        assert_eq!(all[1].name, "Toby");

        assert_eq!(repo.list_pets(Some(owner_id)).await.unwrap().len(), 2);
        assert!(repo.list_pets(Some(owner_id + 1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_keeps_owner() {
        let (repo, owner_id) = setup_test().await;
        let pet = repo.insert_pet(owner_id, &record("Max", Species::Dog), Utc::now()).await.unwrap();

        let mut changed = record("Maximus", Species::Other);
        changed.birth_date = NaiveDate::from_ymd_opt(2019, 5, 4).unwrap();
        let saved = repo.save_pet(pet.id, &changed).await.expect("Failed to save pet");

        assert_eq!(saved.name, "Maximus");
        assert_eq!(saved.species, Species::Other);
        assert_eq!(saved.birth_date, changed.birth_date);
        assert_eq!(saved.owner_id, owner_id);
    }

    #[tokio::test]
    async fn test_remove_pet_without_appointments() {
        let (repo, owner_id) = setup_test().await;
        let pet = repo.insert_pet(owner_id, &record("Max", Species::Dog), Utc::now()).await.unwrap();

        assert_eq!(repo.count_appointments(pet.id).await.unwrap(), 0);
        repo.remove_pet(pet.id).await.expect("Failed to remove pet");
        assert!(repo.find_pet(pet.id).await.unwrap().is_none());

        let err = repo.remove_pet(pet.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { kind: EntityKind::Pet, .. }));
    }
}
