use anyhow::Result;
use chrono::NaiveDate;
use sqlx::any::AnyPool;
use sqlx::migrate::MigrateDatabase;
use sqlx::Any;
use tracing::info;

use crate::config::DbConfig;

/// Idempotent schema, executed at startup. Kept to statements every
/// configured backend accepts.
const SCHEMA: &[&str] = &["CREATE TABLE IF NOT EXISTS marked_days (day TEXT PRIMARY KEY)"];

/// Process-wide database handle. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct DatabaseManager {
    pub pool: AnyPool,
}

impl DatabaseManager {
    pub async fn new(db_config: &DbConfig) -> Result<Self> {
        let url = db_config.driver_url();

        // Create the database if it doesn't exist (file-backed sqlite
        // in particular).
        if !Any::database_exists(&url).await.unwrap_or(false) {
            info!("Creating database");
            Any::create_database(&url).await?;
        }

        let pool = AnyPool::connect(&url).await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// The set of markable days rendered by the calendar widgets.
    pub async fn marked_days(&self) -> Result<Vec<NaiveDate>> {
        let rows: Vec<String> = sqlx::query_scalar("SELECT day FROM marked_days ORDER BY day")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .filter_map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .collect())
    }
}
