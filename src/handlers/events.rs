//! Event CRUD handlers. Each one runs a single statement against the store.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, info};

use crate::models::{ArchiveRequest, EventPayload};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::JsonBody;
use crate::utils::response;

pub const EVENT_NOT_FOUND: &str = "Event not found";

/// Ids are integers; anything else cannot name a row.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(EVENT_NOT_FOUND.to_string()))
}

fn ensure_found(affected: u64) -> Result<(), AppError> {
    if affected == 0 {
        Err(AppError::NotFound(EVENT_NOT_FOUND.to_string()))
    } else {
        Ok(())
    }
}

/// POST /
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EventPayload>,
) -> Result<Response, AppError> {
    debug!(?payload, "Received data for new event");

    let fields = payload.into_fields();
    let id = state.store.insert(&fields).await?;

    info!(id, "Event added");
    Ok(response::created(id, "Event added successfully"))
}

/// PUT /:id
pub async fn update_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<EventPayload>,
) -> Result<Response, AppError> {
    debug!(id = %raw_id, ?payload, "Received data for update");

    let id = parse_id(&raw_id)?;
    let fields = payload.into_fields();
    ensure_found(state.store.update(id, &fields).await?)?;

    info!(id, "Event updated");
    Ok(response::ok("Event updated successfully"))
}

/// PUT /archive/:id
pub async fn archive_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(request): JsonBody<ArchiveRequest>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id)?;
    let status = request.status_text();
    ensure_found(state.store.set_status(id, status.as_deref()).await?)?;

    info!(id, status = ?status, "Event status changed");
    let message = if request.is_reactivation() {
        "Event status updated to Active"
    } else {
        "Event archived successfully"
    };
    Ok(response::ok(message))
}

/// DELETE /delete/:id
pub async fn delete_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id)?;
    ensure_found(state.store.delete(id).await?)?;

    info!(id, "Event deleted");
    Ok(response::ok("Event deleted successfully"))
}

/// GET /
pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.list().await?;
    Ok(Json(events).into_response())
}
