use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{EntityKind, Owner, OwnerRecord};
use crate::storage::sqlite::child_count;
use crate::storage::traits::{OwnerStorage, StorageResult};
use crate::storage::{DbConnection, StorageError};

const SELECT_OWNER: &str = r#"
    SELECT o.id, o.first_name, o.last_name, o.phone, o.email, o.created_at,
           (SELECT COUNT(*) FROM pets p WHERE p.owner_id = o.id) AS pet_count
    FROM owners o
"#;

/// Repository for owner operations
#[derive(Clone)]
pub struct OwnerRepository {
    db: DbConnection,
}

impl OwnerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn owner_from_row(row: &SqliteRow) -> StorageResult<Owner> {
        Ok(Owner {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
            pet_count: child_count(EntityKind::Owner, row.try_get("pet_count")?)?,
        })
    }

    async fn load(&self, owner_id: i64) -> StorageResult<Owner> {
        self.find_owner(owner_id)
            .await?
            .ok_or(StorageError::NotFound { kind: EntityKind::Owner, id: owner_id })
    }
}

#[async_trait]
impl OwnerStorage for OwnerRepository {
    async fn insert_owner(&self, record: &OwnerRecord, created_at: DateTime<Utc>) -> StorageResult<Owner> {
        let result = sqlx::query(
            r#"
            INSERT INTO owners (first_name, last_name, phone, email, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        self.load(result.last_insert_rowid()).await
    }

    async fn find_owner(&self, owner_id: i64) -> StorageResult<Option<Owner>> {
        let row = sqlx::query(&format!("{} WHERE o.id = ?", SELECT_OWNER))
            .bind(owner_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::owner_from_row).transpose()
    }

    async fn list_owners(&self) -> StorageResult<Vec<Owner>> {
        let rows = sqlx::query(&format!("{} ORDER BY o.last_name ASC, o.first_name ASC, o.id ASC", SELECT_OWNER))
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::owner_from_row).collect()
    }

    async fn save_owner(&self, owner_id: i64, record: &OwnerRecord) -> StorageResult<Owner> {
        let result = sqlx::query(
            r#"
            UPDATE owners
            SET first_name = ?, last_name = ?, phone = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(owner_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { kind: EntityKind::Owner, id: owner_id });
        }

        self.load(owner_id).await
    }

    async fn remove_owner(&self, owner_id: i64) -> StorageResult<()> {
        let mut tx = self.db.pool().begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM owners WHERE id = ?")
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StorageError::NotFound { kind: EntityKind::Owner, id: owner_id });
        }

        let pets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;
        let has_dependents = StorageError::HasDependents {
            kind: EntityKind::Owner,
            id: owner_id,
            dependent: EntityKind::Pet,
        };
        if pets > 0 {
            return Err(has_dependents);
        }

        match sqlx::query("DELETE FROM owners WHERE id = ?")
            .bind(owner_id)
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

    async fn count_pets(&self, owner_id: i64) -> StorageResult<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(self.db.pool())
            .await?;
        child_count(EntityKind::Owner, count)
    }
}
