//! Outbound email delivery.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::OutgoingMail;

pub mod smtp;

pub use smtp::SmtpRelay;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivers a single message on behalf of the configured sender.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Returns the relay's delivery response on success.
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError>;
}
