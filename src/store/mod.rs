//! Persistence for the `events` table.
//!
//! Every operation issues a single statement. Mutations report the number of
//! affected rows so callers can tell "no such event" apart from success.

use async_trait::async_trait;

use crate::models::{Event, EventFields};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgEventStore;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts a row and returns the generated id.
    async fn insert(&self, fields: &EventFields) -> Result<i64, sqlx::Error>;

    /// Replaces every writable column of the row.
    async fn update(&self, id: i64, fields: &EventFields) -> Result<u64, sqlx::Error>;

    async fn set_status(&self, id: i64, status: Option<&str>) -> Result<u64, sqlx::Error>;

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;

    /// All rows in store order.
    async fn list(&self) -> Result<Vec<Event>, sqlx::Error>;
}
