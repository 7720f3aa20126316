//! PostgreSQL-backed event store.
//!
//! The table is managed outside this service:
//!
//! ```sql
//! CREATE TABLE events (
//!     "id"              BIGSERIAL PRIMARY KEY,
//!     "title"           TEXT,
//!     "description"     TEXT,
//!     "date"            TEXT,
//!     "time"            TEXT,
//!     "location"        TEXT,
//!     "organizer"       TEXT,
//!     "category"        TEXT,
//!     "recurrence"      TEXT,
//!     "endDate"         TEXT,
//!     "recurrenceDates" TEXT,
//!     "status"          TEXT NOT NULL DEFAULT 'Active'
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::EventStore;
use crate::config::DatabaseConfig;
use crate::models::{Event, EventFields};

const INSERT_EVENT: &str = r#"
    INSERT INTO events ("title", "description", "date", "time", "location", "organizer",
                        "category", "recurrence", "endDate", "recurrenceDates")
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING "id"
"#;

const UPDATE_EVENT: &str = r#"
    UPDATE events
    SET "title" = $1, "description" = $2, "date" = $3, "time" = $4, "location" = $5,
        "organizer" = $6, "category" = $7, "recurrence" = $8, "endDate" = $9,
        "recurrenceDates" = $10
    WHERE "id" = $11
"#;

const UPDATE_STATUS: &str = r#"UPDATE events SET "status" = $1 WHERE "id" = $2"#;

const DELETE_EVENT: &str = r#"DELETE FROM events WHERE "id" = $1"#;

const SELECT_EVENTS: &str = "SELECT * FROM events";

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, fields: &EventFields) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(INSERT_EVENT)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.date)
            .bind(&fields.time)
            .bind(&fields.location)
            .bind(&fields.organizer)
            .bind(&fields.category)
            .bind(&fields.recurrence)
            .bind(&fields.end_date)
            .bind(&fields.recurrence_dates)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: i64, fields: &EventFields) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(UPDATE_EVENT)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.date)
            .bind(&fields.time)
            .bind(&fields.location)
            .bind(&fields.organizer)
            .bind(&fields.category)
            .bind(&fields.recurrence)
            .bind(&fields.end_date)
            .bind(&fields.recurrence_dates)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn set_status(&self, id: i64, status: Option<&str>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(UPDATE_STATUS)
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(DELETE_EVENT)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(SELECT_EVENTS)
            .fetch_all(&self.pool)
            .await
    }
}
