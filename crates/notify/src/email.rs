//! Email delivery via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport (STARTTLS).
//! Configuration is loaded from environment variables at startup; missing
//! required variables abort the process.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::{EmailMessage, Notifier};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address. Defaults to the SMTP user.
    pub from_address: String,
    pub smtp_user: String,
    pub smtp_password: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default       |
    /// |-----------------|----------|---------------|
    /// | `SMTP_HOST`     | yes      |               |
    /// | `SMTP_USER`     | yes      |               |
    /// | `SMTP_PASSWORD` | yes      |               |
    /// | `SMTP_PORT`     | no       | `587`         |
    /// | `SMTP_FROM`     | no       | `SMTP_USER`   |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set.
    pub fn from_env() -> Self {
        let smtp_host = std::env::var("SMTP_HOST").expect("SMTP_HOST must be set");
        let smtp_user = std::env::var("SMTP_USER").expect("SMTP_USER must be set");
        let smtp_password = std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD must be set");

        Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM").unwrap_or_else(|_| smtp_user.clone()),
            smtp_user,
            smtp_password,
        }
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends email through one pooled SMTP transport.
pub struct SmtpNotifier {
    from_address: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.smtp_user, config.smtp_password))
            .build();
        Ok(Self {
            from_address: config.from_address,
            mailer,
        })
    }

    fn build(&self, message: EmailMessage) -> Result<Message, EmailError> {
        let builder = Message::builder()
            .from(self.from_address.parse()?)
            .to(message.to.parse()?)
            .subject(message.subject);

        let built = match message.attachment {
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.body),
            Some(file) => {
                let content_type = ContentType::parse(&file.content_type)
                    .map_err(|e| EmailError::Build(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(message.body))
                        .singlepart(MimeAttachment::new(file.filename).body(file.bytes, content_type)),
                )
            }
        };
        built.map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let to = message.to.clone();
        let subject = message.subject.clone();
        let email = self.build(message)?;
        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attachment;

    fn notifier() -> SmtpNotifier {
        SmtpNotifier::new(EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: "team@example.com".into(),
            smtp_user: "team@example.com".into(),
            smtp_password: "secret".into(),
        })
        .unwrap()
    }

    fn message() -> EmailMessage {
        EmailMessage {
            to: "creator@example.com".into(),
            subject: "Hello".into(),
            body: "Body text".into(),
            attachment: None,
        }
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[tokio::test]
    async fn plain_message_builds() {
        let email = notifier().build(message()).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("Body text"));
    }

    #[tokio::test]
    async fn attachment_becomes_multipart() {
        let mut msg = message();
        msg.attachment = Some(Attachment {
            filename: "form.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        });
        let email = notifier().build(msg).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("form.pdf"));
    }

    #[tokio::test]
    async fn bad_recipient_is_an_address_error() {
        let mut msg = message();
        msg.to = "nobody".into();
        assert!(matches!(notifier().build(msg), Err(EmailError::Address(_))));
    }
}
