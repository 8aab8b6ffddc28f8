use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::AppointmentStatus;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Appointment, AppointmentRecord, EntityKind};
use crate::storage::traits::{AppointmentStorage, StorageResult};
use crate::storage::{DbConnection, StorageError};

const SELECT_APPOINTMENT: &str = r#"
    SELECT a.id, a.appointment_date, a.reason, a.status, a.notes, a.created_at, a.pet_id,
           p.name AS pet_name,
           o.first_name || ' ' || o.last_name AS owner_name
    FROM appointments a
    JOIN pets p ON p.id = a.pet_id
    JOIN owners o ON o.id = p.owner_id
"#;

/// Repository for appointment operations
#[derive(Clone)]
pub struct AppointmentRepository {
    db: DbConnection,
}

impl AppointmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn appointment_from_row(row: &SqliteRow) -> StorageResult<Appointment> {
        let status: String = row.try_get("status")?;
        let status = status.parse::<AppointmentStatus>().map_err(|e| StorageError::Corrupt {
            kind: EntityKind::Appointment,
            detail: e.to_string(),
        })?;

        Ok(Appointment {
            id: row.try_get("id")?,
            appointment_date: row.try_get("appointment_date")?,
            reason: row.try_get("reason")?,
            status,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            pet_id: row.try_get("pet_id")?,
            pet_name: row.try_get("pet_name")?,
            owner_name: row.try_get("owner_name")?,
        })
    }

    async fn load(&self, appointment_id: i64) -> StorageResult<Appointment> {
        self.find_appointment(appointment_id)
            .await?
            .ok_or(StorageError::NotFound { kind: EntityKind::Appointment, id: appointment_id })
    }
}

#[async_trait]
impl AppointmentStorage for AppointmentRepository {
    async fn insert_appointment(
        &self,
        pet_id: i64,
        record: &AppointmentRecord,
        created_at: DateTime<Utc>,
    ) -> StorageResult<Appointment> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (appointment_date, reason, status, notes, created_at, pet_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.appointment_date)
        .bind(&record.reason)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .bind(created_at)
        .bind(pet_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| {
            if StorageError::is_foreign_key_violation(&e) {
                StorageError::MissingReference { kind: EntityKind::Pet, id: pet_id }
            } else {
                e.into()
            }
        })?;

        self.load(result.last_insert_rowid()).await
    }

    async fn find_appointment(&self, appointment_id: i64) -> StorageResult<Option<Appointment>> {
        let row = sqlx::query(&format!("{} WHERE a.id = ?", SELECT_APPOINTMENT))
            .bind(appointment_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::appointment_from_row).transpose()
    }

    async fn list_appointments(&self, pet_id: Option<i64>) -> StorageResult<Vec<Appointment>> {
        let rows = match pet_id {
            Some(pet_id) => {
                sqlx::query(&format!(
                    "{} WHERE a.pet_id = ? ORDER BY a.appointment_date ASC, a.id ASC",
                    SELECT_APPOINTMENT
                ))
                .bind(pet_id)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(&format!("{} ORDER BY a.appointment_date ASC, a.id ASC", SELECT_APPOINTMENT))
                    .fetch_all(self.db.pool())
                    .await?
            }
        };

        rows.iter().map(Self::appointment_from_row).collect()
    }

    async fn save_appointment(
        &self,
        appointment_id: i64,
        record: &AppointmentRecord,
        expected_status: AppointmentStatus,
    ) -> StorageResult<Appointment> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET appointment_date = ?, reason = ?, status = ?, notes = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(record.appointment_date)
        .bind(&record.reason)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .bind(appointment_id)
        .bind(expected_status.as_str())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            // either the row is gone or someone else moved its status first
            return match self.find_appointment(appointment_id).await? {
                Some(_) => Err(StorageError::StaleStatus { id: appointment_id }),
                None => Err(StorageError::NotFound { kind: EntityKind::Appointment, id: appointment_id }),
            };
        }

        self.load(appointment_id).await
    }

    async fn remove_appointment(&self, appointment_id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(appointment_id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { kind: EntityKind::Appointment, id: appointment_id });
        }
        Ok(())
    }
}
