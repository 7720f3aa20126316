use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Image received on `POST /send-email`, spooled to a temporary file that is
/// removed when this value is dropped.
#[derive(Debug)]
pub struct UploadedImage {
    pub original_name: String,
    pub content_type: Option<String>,
    pub file: NamedTempFile,
}

impl UploadedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Base name of the client-supplied file name.
    pub fn base_name(&self) -> String {
        Path::new(&self.original_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string())
    }
}

/// Fields of the send-email form.
#[derive(Debug, Default)]
pub struct EmailForm {
    pub subject: String,
    pub message: String,
    pub recipients: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailAttachment {
    pub filename: String,
    pub path: PathBuf,
    pub content_type: Option<String>,
}

/// Message handed to the mail relay. The relay fills in the sender.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub attachments: Vec<MailAttachment>,
}
