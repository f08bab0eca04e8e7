//! # Mail Client
//!
//! The seam between the statistics report and whatever delivers mail.
//!
//! The server ships with [`LoggingMailClient`], which writes the message to
//! the log and reports success. A real transport implements
//! [`MailSendClient`] and is handed to [`AppState::new`](crate::AppState::new).

use async_trait::async_trait;
use tracing::info;

/// Mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Could not reach or talk to the mail transport.
    #[error("Mail transport failed: {0}")]
    Transport(String),

    /// The transport refused the message.
    #[error("Mail to {recipient} rejected: {reason}")]
    Rejected { recipient: String, reason: String },
}

/// Sends one plain-text message.
///
/// ## Returns
/// * `Ok(true)` - the transport accepted the message
/// * `Ok(false)` - the transport declined without an error
/// * `Err(_)` - the transport failed
#[async_trait]
pub trait MailSendClient: Send + Sync {
    async fn send(
        &self,
        from_email: &str,
        to_email: &str,
        subject: &str,
        content: &str,
    ) -> Result<bool, MailError>;
}

/// Mail client that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMailClient;

#[async_trait]
impl MailSendClient for LoggingMailClient {
    async fn send(
        &self,
        from_email: &str,
        to_email: &str,
        subject: &str,
        content: &str,
    ) -> Result<bool, MailError> {
        info!(from = %from_email, to = %to_email, %subject, %content, "Sending mail");
        Ok(true)
    }
}
