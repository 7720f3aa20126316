use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `{"message": ...}` body used by successful mutations and client errors.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"error": ...}` body used when the store fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub id: i64,
    pub message: String,
}

pub fn message(status: StatusCode, message: impl Into<String>) -> Response {
    let body = MessageBody {
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

pub fn ok(message_text: impl Into<String>) -> Response {
    message(StatusCode::OK, message_text)
}

pub fn created(id: i64, message: impl Into<String>) -> Response {
    let body = CreatedBody {
        id,
        message: message.into(),
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn error(status: StatusCode, error: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: error.into(),
    };
    (status, Json(body)).into_response()
}
