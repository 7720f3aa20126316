//! In-memory event store used by the handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::EventStore;
use crate::models::event::STATUS_ACTIVE;
use crate::models::{Event, EventFields};

pub const NOT_NULL_STATUS: &str =
    "null value in column \"status\" of relation \"events\" violates not-null constraint";

#[derive(Default)]
pub struct MemoryEventStore {
    rows: RwLock<Vec<Event>>,
    next_id: RwLock<i64>,
    failing: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<Event> {
        self.rows.read().await.clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

fn apply(event: &mut Event, fields: &EventFields) {
    let fields = fields.clone();
    event.title = fields.title;
    event.description = fields.description;
    event.date = fields.date;
    event.time = fields.time;
    event.location = fields.location;
    event.organizer = fields.organizer;
    event.category = fields.category;
    event.recurrence = fields.recurrence;
    event.end_date = fields.end_date;
    event.recurrence_dates = fields.recurrence_dates;
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert(&self, fields: &EventFields) -> Result<i64, sqlx::Error> {
        self.check()?;
        let id = {
            let mut next = self.next_id.write().await;
            *next += 1;
            *next
        };

        let mut event = Event {
            id,
            title: None,
            description: None,
            date: None,
            time: None,
            location: None,
            organizer: None,
            category: None,
            recurrence: None,
            end_date: None,
            recurrence_dates: None,
            status: Some(STATUS_ACTIVE.to_string()),
        };
        apply(&mut event, fields);
        self.rows.write().await.push(event);
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &EventFields) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                apply(event, fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_status(&self, id: i64, status: Option<&str>) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.write().await;
        let Some(event) = rows.iter_mut().find(|e| e.id == id) else {
            return Ok(0);
        };
        // "status" is NOT NULL in the schema.
        let status = status.ok_or_else(|| sqlx::Error::Protocol(NOT_NULL_STATUS.to_string()))?;
        event.status = Some(status.to_string());
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn list(&self) -> Result<Vec<Event>, sqlx::Error> {
        self.check()?;
        Ok(self.rows.read().await.clone())
    }
}
