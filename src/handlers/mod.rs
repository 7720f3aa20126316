use axum::Json;
use serde::Serialize;

pub mod email;
pub mod events;

pub use email::send_email;
pub use events::{archive_event, create_event, delete_event, list_events, update_event};

#[derive(Serialize)]
pub struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        service: "events-server",
    })
}
