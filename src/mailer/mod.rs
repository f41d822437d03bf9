//! Outbound guest mail over SMTP.
//!
//! [`Mailer`] owns the SMTP connection parameters and sends the rendered
//! [`templates::MailContent`] bodies via Lettre. Sending is fire-and-forget
//! relative to the admin request: failures surface as [`ApiError::Mail`]
//! and are not retried.

pub mod templates;

use lettre::message::header::ContentType;
use lettre::message::{Attachment as LettreAttachment, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::AppConfig;
use crate::error::ApiError;
pub use templates::MailContent;

/// A file attached to an outbound mail (the invoice PDF).
#[derive(Debug, Clone)]
pub struct MailAttachment {
    /// Filename shown to the recipient.
    pub filename: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
}

/// SMTP mailer for guest notifications.
///
/// A new transport is built per mail to avoid connection pooling issues;
/// the blocking send runs on the Tokio blocking pool.
#[derive(Debug, Clone)]
pub struct Mailer {
    host: String,
    port: u16,
    user: String,
    pass: String,
    from: String,
}

impl Mailer {
    /// Creates a mailer from the service configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            host: config.mail_host.clone(),
            port: config.mail_port,
            user: config.mail_user.clone(),
            pass: config.mail_pass.clone(),
            from: config.mail_from.clone(),
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport, ApiError> {
        Ok(SmtpTransport::relay(&self.host)
            .map_err(|e| ApiError::Mail(format!("smtp relay error: {e}")))?
            .port(self.port)
            .credentials(Credentials::new(self.user.clone(), self.pass.clone()))
            .build())
    }

    /// Sends a rendered mail to a guest.
    ///
    /// `send_copy` BCCs the sender address so the office keeps a record,
    /// matching how confirmations and cancellations were always handled.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Mail`] when the message cannot be built or the
    /// SMTP transaction fails.
    pub async fn send(
        &self,
        to: &str,
        content: &MailContent,
        send_copy: bool,
        attachments: Vec<MailAttachment>,
    ) -> Result<(), ApiError> {
        let alternative =
            MultiPart::alternative_plain_html(content.text.clone(), content.html.clone());
        let body = if attachments.is_empty() {
            alternative
        } else {
            let mut mixed = MultiPart::mixed().multipart(alternative);
            for attachment in attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| ApiError::Mail(format!("invalid attachment type: {e}")))?;
                mixed = mixed.singlepart(
                    LettreAttachment::new(attachment.filename)
                        .body(attachment.content, content_type),
                );
            }
            mixed
        };

        let mut builder = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| ApiError::Mail(format!("invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| ApiError::Mail(format!("invalid to address: {e}")))?)
            .subject(&content.subject);
        if send_copy {
            builder = builder.bcc(
                self.from
                    .parse()
                    .map_err(|e| ApiError::Mail(format!("invalid bcc address: {e}")))?,
            );
        }
        let email = builder
            .multipart(body)
            .map_err(|e| ApiError::Mail(format!("failed to build email: {e}")))?;

        let transport = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            transport
                .send(&email)
                .map_err(|e| ApiError::Mail(format!("failed to send email: {e}")))
        })
        .await
        .map_err(|e| ApiError::Mail(format!("email task failed: {e}")))?
        .map(|_| ())
    }
}
