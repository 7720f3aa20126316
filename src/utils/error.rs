use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::mail::MailError;
use crate::utils::response;

pub const MAIL_FAILURE_MESSAGE: &str = "Failed to send email";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Mail(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                warn!(message = %msg, "Request rejected");
            }
            AppError::Database(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::Mail(e) => {
                error!(error = ?e, "Error sending email");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, "Internal error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log();

        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                response::message(status, msg)
            }
            // Store failures expose the driver message under `error`.
            AppError::Database(e) => response::error(status, e.to_string()),
            AppError::Mail(_) => response::message(status, MAIL_FAILURE_MESSAGE),
            AppError::Internal(msg) => response::error(status, msg),
        }
    }
}
