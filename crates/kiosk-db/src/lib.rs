//! # kiosk-db: Database Layer for the Cafe Kiosk
//!
//! This crate provides database access for the kiosk backend.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe Kiosk Data Flow                             │
//! │                                                                         │
//! │  kiosk-server service (OrderService::create_order)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kiosk-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo    │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ OrderRepo      │   │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │ MailHistoryRepo│   │   schema.sql │  │   │
//! │  │   │ Management    │    │                │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (kiosk.db)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiosk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./kiosk.db")).await?;
//!
//! let latest = db.products().find_latest_product_number().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::mail_history::MailSendHistoryRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
