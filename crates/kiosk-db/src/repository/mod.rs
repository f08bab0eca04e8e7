//! # Repository Module
//!
//! Database repository implementations for the cafe kiosk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service (kiosk-server)                                                │
//! │       │                                                                 │
//! │       │  db.products().find_latest_product_number()                    │
//! │       ▼                                                                 │
//! │  ProductRepository / OrderRepository / MailSendHistoryRepository       │
//! │       │                                                                 │
//! │       │  SQL Query (runtime-checked, mapped with FromRow)               │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Menu listing, numbering, insert
//! - [`OrderRepository`](order::OrderRepository) - Transactional placement, report queries
//! - [`MailSendHistoryRepository`](mail_history::MailSendHistoryRepository) - Mail audit trail

pub mod mail_history;
pub mod order;
pub mod product;
