use std::sync::Arc;

use crate::config::UploadConfig;
use crate::mail::MailRelay;
use crate::store::EventStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub mailer: Arc<dyn MailRelay>,
    pub uploads: UploadConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn EventStore>,
        mailer: Arc<dyn MailRelay>,
        uploads: UploadConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            uploads,
        }
    }
}
