//! # Kiosk Server
//!
//! HTTP API for the cafe kiosk, plus the daily sales statistics mail.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kiosk Server Services                           │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │ ProductService │  │  OrderService  │  │  OrderStatisticsService    ││
//! │  │                │  │                │  │                            ││
//! │  │ • create       │  │ • create_order │  │ • send_order_statistics_   ││
//! │  │ • selling list │  │                │  │   mail ──► MailService     ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                │
//! │  │ HealthService  │  │ ReportScheduler│                                │
//! │  │ • check        │  │ (daily, opt-in)│                                │
//! │  └────────────────┘  └────────────────┘                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │  ┌──────────────┐  ┌──────────────────────────────────────────┐  │  │
//! │  │  │   SQLite     │  │  MailSendClient (LoggingMailClient)      │  │  │
//! │  │  │  (kiosk-db)  │  │                                          │  │  │
//! │  │  └──────────────┘  └──────────────────────────────────────────┘  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`](crate::config). Every value can come from `kiosk.toml` or from
//! `KIOSK__<SECTION>__<KEY>` environment variables.

pub mod config;
pub mod error;
pub mod mail;
pub mod response;
pub mod routes;
pub mod scheduler;
pub mod services;

use std::sync::Arc;

use kiosk_db::Database;

// Re-exports
pub use crate::config::KioskConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use mail::{LoggingMailClient, MailError, MailSendClient};
pub use response::ApiResponse;
pub use routes::build_router;

use crate::services::{
    HealthService, MailService, OrderService, OrderStatisticsService, ProductService,
};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub products: ProductService,
    pub orders: OrderService,
    pub statistics: OrderStatisticsService,
    pub health: HealthService,
}

impl AppState {
    /// Wires every service over one database and one mail client.
    pub fn new(db: Database, mail_client: Arc<dyn MailSendClient>, from_email: &str) -> Self {
        let mail = MailService::new(db.clone(), mail_client);

        AppState {
            products: ProductService::new(db.clone()),
            orders: OrderService::new(db.clone()),
            statistics: OrderStatisticsService::new(db.clone(), mail, from_email),
            health: HealthService::new(db),
        }
    }
}
