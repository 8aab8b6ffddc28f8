use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::storage::StorageError;

// The database URL for the production database
pub const DEFAULT_DATABASE_URL: &str = "sqlite:clinic.db";

/// DbConnection owns the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the file and schema if needed
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        Self::connect(url, SqlitePoolOptions::new()).await
    }

    /// Initialize a private in-memory database, used by tests
    pub async fn init_in_memory() -> Result<Self, StorageError> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:clinic_{}?mode=memory&cache=shared", test_id);

        // one connection keeps the in-memory database alive for the pool's lifetime
        Self::connect(&db_url, SqlitePoolOptions::new().max_connections(1)).await
    }

    async fn connect(url: &str, pool_options: SqlitePoolOptions) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = pool_options.connect_with(options).await?;

        Self::setup_schema(&pool).await?;
        info!("Connected to {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip to the database; used by the health check
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS owners (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_owners_name
            ON owners(last_name, first_name);
            "#,
        )
        .execute(pool)
        .await?;

        // pets may not outlive their owner; deleting a parent with children is refused
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                species TEXT NOT NULL,
                breed TEXT NOT NULL,
                birth_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                owner_id INTEGER NOT NULL,
                FOREIGN KEY (owner_id) REFERENCES owners (id) ON DELETE RESTRICT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_pets_owner_id
            ON pets(owner_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                appointment_date TEXT NOT NULL,
                reason TEXT NOT NULL,
                status TEXT NOT NULL
                    CHECK (status IN ('Scheduled', 'Completed', 'Cancelled')),
                notes TEXT,
                created_at TEXT NOT NULL,
                pet_id INTEGER NOT NULL,
                FOREIGN KEY (pet_id) REFERENCES pets (id) ON DELETE RESTRICT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_appointments_pet_id
            ON appointments(pet_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
