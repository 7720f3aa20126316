use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, MailRelay};
use crate::config::MailConfig;
use crate::models::OutgoingMail;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// SMTP submission through an authenticated relay (implicit TLS).
pub struct SmtpRelay {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let sender = parse_mailbox(&config.sender)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .credentials(Credentials::new(
                config.sender.clone(),
                config.app_password.clone(),
            ))
            .build();

        tracing::info!(host = %config.smtp_host, sender = %config.sender, "SMTP relay configured");
        Ok(Self { sender, transport })
    }
}

/// An attachment whose content has already been loaded.
struct LoadedAttachment {
    filename: String,
    content_type: ContentType,
    body: Vec<u8>,
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn content_type_for(raw: Option<&str>) -> Result<ContentType, MailError> {
    raw.and_then(|ct| ContentType::parse(ct).ok())
        .map(Ok)
        .unwrap_or_else(|| {
            ContentType::parse(FALLBACK_CONTENT_TYPE).map_err(|e| MailError::Build(e.to_string()))
        })
}

async fn load_attachments(mail: &OutgoingMail) -> Result<Vec<LoadedAttachment>, MailError> {
    let mut loaded = Vec::with_capacity(mail.attachments.len());
    for attachment in &mail.attachments {
        let body = tokio::fs::read(&attachment.path)
            .await
            .map_err(|source| MailError::Attachment {
                path: attachment.path.display().to_string(),
                source,
            })?;
        loaded.push(LoadedAttachment {
            filename: attachment.filename.clone(),
            content_type: content_type_for(attachment.content_type.as_deref())?,
            body,
        });
    }
    Ok(loaded)
}

fn build_message(
    sender: &Mailbox,
    mail: &OutgoingMail,
    attachments: Vec<LoadedAttachment>,
) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(sender.clone())
        .subject(mail.subject.clone());
    for recipient in &mail.to {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    let result = if attachments.is_empty() {
        builder
            .header(ContentType::TEXT_PLAIN)
            .body(mail.text.clone())
    } else {
        let body = attachments.into_iter().fold(
            MultiPart::mixed().singlepart(SinglePart::plain(mail.text.clone())),
            |parts, attachment| {
                parts.singlepart(
                    Attachment::new(attachment.filename).body(attachment.body, attachment.content_type),
                )
            },
        );
        builder.multipart(body)
    };

    result.map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailError> {
        let attachments = load_attachments(&mail).await?;
        let message = build_message(&self.sender, &mail, attachments)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(format!(
            "{} {}",
            response.code(),
            response
                .message()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        ))
    }
}
