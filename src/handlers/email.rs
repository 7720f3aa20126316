//! `POST /send-email`: mails a subject, message and optional image to a
//! validated list of recipients.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::response::Response;
use std::path::Path;
use tracing::{debug, info};

use crate::models::{EmailForm, MailAttachment, OutgoingMail, UploadedImage};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response;
use crate::utils::validation::{parse_recipients, validate_recipients};

const IMAGE_FIELD: &str = "image";
const DUPLICATE_IMAGE_MESSAGE: &str = "Unexpected field: image";

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Validation(err.body_text())
}

fn upload_error(err: std::io::Error) -> AppError {
    AppError::Internal(format!("Failed to store upload: {}", err))
}

/// Writes the uploaded file into `upload_dir`. The file is deleted when the
/// returned value is dropped.
async fn spool_image(field: Field<'_>, upload_dir: &Path) -> Result<UploadedImage, AppError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(upload_error)?;
    let dir = upload_dir.to_path_buf();
    let file = tokio::task::spawn_blocking(move || {
        tempfile::Builder::new().prefix("upload-").tempfile_in(dir)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Upload task failed: {}", e)))?
    .map_err(upload_error)?;
    tokio::fs::write(file.path(), &bytes)
        .await
        .map_err(upload_error)?;

    debug!(name = %original_name, size = bytes.len(), path = %file.path().display(), "Image uploaded");
    Ok(UploadedImage {
        original_name,
        content_type,
        file,
    })
}

async fn read_form(mut multipart: Multipart, upload_dir: &Path) -> Result<EmailForm, AppError> {
    let mut form = EmailForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "subject" => form.subject = field.text().await.map_err(multipart_error)?,
            "message" => form.message = field.text().await.map_err(multipart_error)?,
            "recipients" => form.recipients = Some(field.text().await.map_err(multipart_error)?),
            IMAGE_FIELD if field.file_name().is_some() => {
                if form.image.is_some() {
                    return Err(AppError::Validation(DUPLICATE_IMAGE_MESSAGE.to_string()));
                }
                form.image = Some(spool_image(field, upload_dir).await?);
            }
            other => debug!(field = other, "Ignoring form field"),
        }
    }

    Ok(form)
}

/// POST /send-email
pub async fn send_email(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    // `form` owns the upload, so it must outlive the relay call.
    let form = read_form(multipart, &state.uploads.dir).await?;

    let recipients = parse_recipients(form.recipients.as_deref())?;
    validate_recipients(&recipients)?;

    let attachments = form
        .image
        .iter()
        .map(|image| MailAttachment {
            filename: image.base_name(),
            path: image.path().to_path_buf(),
            content_type: image.content_type.clone(),
        })
        .collect();

    let mail = OutgoingMail {
        to: recipients,
        subject: form.subject,
        text: form.message,
        attachments,
    };

    let recipient_count = mail.to.len();
    let relay_response = state.mailer.send(mail).await?;

    info!(recipients = recipient_count, response = %relay_response, "Email sent");
    Ok(response::ok("Email sent successfully"))
}
