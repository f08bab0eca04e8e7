//! # Mail Send History Repository
//!
//! Append-only audit trail of statistics mail attempts. Rows are never
//! updated: a retry by the operator is a new attempt and a new row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kiosk_core::{MailSendHistory, NewMailSendHistory};

const HISTORY_COLUMNS: &str = "id, from_email, to_email, subject, content, succeeded, created_at";

#[derive(Debug, Clone)]
pub struct MailSendHistoryRepository {
    pool: SqlitePool,
}

impl MailSendHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MailSendHistoryRepository { pool }
    }

    /// Records one attempt.
    pub async fn insert(&self, history: &NewMailSendHistory) -> DbResult<MailSendHistory> {
        debug!(to = %history.to_email, succeeded = history.succeeded, "Recording mail attempt");

        let stored = sqlx::query_as::<_, MailSendHistory>(&format!(
            r#"
            INSERT INTO mail_send_histories (
                from_email, to_email, subject, content, succeeded, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {HISTORY_COLUMNS}
            "#
        ))
        .bind(&history.from_email)
        .bind(&history.to_email)
        .bind(&history.subject)
        .bind(&history.content)
        .bind(history.succeeded)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// All attempts, oldest first.
    pub async fn find_all(&self) -> DbResult<Vec<MailSendHistory>> {
        let histories = sqlx::query_as::<_, MailSendHistory>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM mail_send_histories ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(histories)
    }

    /// Attempts addressed to `to_email`, oldest first.
    pub async fn find_all_by_recipient(&self, to_email: &str) -> DbResult<Vec<MailSendHistory>> {
        let histories = sqlx::query_as::<_, MailSendHistory>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM mail_send_histories WHERE to_email = ?1 ORDER BY id"
        ))
        .bind(to_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(histories)
    }
}
