//! Sends mail through the configured client and records every attempt.

use std::sync::Arc;

use tracing::{info, warn};

use kiosk_core::NewMailSendHistory;
use kiosk_db::Database;

use crate::error::ApiResult;
use crate::mail::MailSendClient;

#[derive(Clone)]
pub struct MailService {
    db: Database,
    client: Arc<dyn MailSendClient>,
}

impl MailService {
    pub fn new(db: Database, client: Arc<dyn MailSendClient>) -> Self {
        MailService { db, client }
    }

    /// Sends one message and stores a history row for the attempt.
    ///
    /// ## Returns
    /// * `Ok(sent)` - the client's answer, also stored as `succeeded`
    /// * `Err(MAIL_ERROR)` - the client failed; the attempt is stored with
    ///   `succeeded = false` first
    pub async fn send_mail(
        &self,
        from_email: &str,
        to_email: &str,
        subject: &str,
        content: &str,
    ) -> ApiResult<bool> {
        let result = self.client.send(from_email, to_email, subject, content).await;
        let succeeded = matches!(result, Ok(true));

        self.db
            .mail_histories()
            .insert(&NewMailSendHistory {
                from_email: from_email.to_string(),
                to_email: to_email.to_string(),
                subject: subject.to_string(),
                content: content.to_string(),
                succeeded,
            })
            .await?;

        match result {
            Ok(sent) => {
                if sent {
                    info!(to = %to_email, %subject, "Mail sent");
                } else {
                    warn!(to = %to_email, %subject, "Mail client declined message");
                }
                Ok(sent)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for MailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailService").finish_non_exhaustive()
    }
}
