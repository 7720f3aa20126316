pub mod email;
pub mod event;

pub use email::{EmailForm, MailAttachment, OutgoingMail, UploadedImage};
pub use event::{ArchiveRequest, Event, EventFields, EventPayload};
