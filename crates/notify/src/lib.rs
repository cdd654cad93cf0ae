//! Outbound notification channels.
//!
//! - [`Notifier`] sends email; [`SmtpNotifier`] is the SMTP implementation.
//! - [`SmsGateway`] sends text messages; [`HttpSmsGateway`] calls an HTTP
//!   gateway.
//! - [`templates`] builds the messages the backend sends.
//!
//! Handlers hold both behind `Arc<dyn _>` so tests can swap in recorders.

pub mod email;
pub mod sms;
pub mod templates;

pub use email::{EmailConfig, EmailError, SmtpNotifier};
pub use sms::{HttpSmsGateway, SmsConfig, SmsError};

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A fully rendered plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

/// Sends email.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// Sends a text message to a mobile number.
#[async_trait::async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), SmsError>;
}
