//! Daily sales statistics mail.
//!
//! ```text
//! send_order_statistics_mail(2024-04-01, owner@cafe)
//!      │
//!      ▼
//! orders PAYMENT_COMPLETED in [2024-04-01 00:00, 2024-04-02 00:00)
//!      │
//!      ▼
//! DailySalesReport { total, subject, content }
//!      │
//!      ▼
//! MailService::send_mail ──► mail_send_histories (one row)
//! ```

use chrono::NaiveDate;
use tracing::info;

use kiosk_core::statistics::{day_range, DailySalesReport, REPORTED_STATUS};
use kiosk_db::Database;

use crate::error::ApiResult;
use crate::services::mail_service::MailService;

#[derive(Debug, Clone)]
pub struct OrderStatisticsService {
    db: Database,
    mail: MailService,
    from_email: String,
}

impl OrderStatisticsService {
    pub fn new(db: Database, mail: MailService, from_email: impl Into<String>) -> Self {
        OrderStatisticsService {
            db,
            mail,
            from_email: from_email.into(),
        }
    }

    /// Mails the total of `date`'s paid orders to `email`.
    ///
    /// ## Returns
    /// Whether the mail client accepted the message. Exactly one history row
    /// is written per call, including when the client fails.
    pub async fn send_order_statistics_mail(&self, date: NaiveDate, email: &str) -> ApiResult<bool> {
        let (start, end) = day_range(date)?;
        let orders = self
            .db
            .orders()
            .find_orders_by(start, end, REPORTED_STATUS)
            .await?;

        let report = DailySalesReport::new(date, &orders)?;
        info!(
            %date,
            orders = orders.len(),
            total = %report.total,
            to = %email,
            "Sending sales statistics"
        );

        self.mail
            .send_mail(&self.from_email, email, &report.subject, &report.content)
            .await
    }
}
