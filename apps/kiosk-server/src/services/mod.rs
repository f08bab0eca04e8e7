//! Service layer.
//!
//! Handlers and the scheduler call these; they call kiosk-db repositories
//! and the mail client.

pub mod health_service;
pub mod mail_service;
pub mod order_service;
pub mod order_statistics_service;
pub mod product_service;

pub use health_service::{HealthService, ServingStatus};
pub use mail_service::MailService;
pub use order_service::OrderService;
pub use order_statistics_service::OrderStatisticsService;
pub use product_service::{NumberRetryPolicy, ProductService};
