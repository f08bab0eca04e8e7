//! # kiosk-core: Pure Business Logic for the Cafe Kiosk
//!
//! This crate holds every business rule of the kiosk as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe Kiosk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Kiosk Frontend                               │   │
//! │  │    Menu UI ──► Order UI ──► Admin (new product, report mail)    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kiosk-server (axum routes + services)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │product_number│ │statistics│  │   │
//! │  │   │  Product  │  │   Money   │  │  001 → 002   │ │ day range│  │   │
//! │  │   │   Order   │  │  (won)    │  └─────────────┘  │ mail text│  │   │
//! │  │   └───────────┘  └───────────┘  ┌─────────────┐  └──────────┘  │   │
//! │  │                                 │ validation  │  ┌──────────┐  │   │
//! │  │                                 │ field errors│  │   dto    │  │   │
//! │  │                                 └─────────────┘  └──────────┘  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kiosk-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderProduct, MailSendHistory)
//! - [`money`] - Money type with integer arithmetic in won
//! - [`error`] - Domain error types
//! - [`validation`] - Request validation with field-level messages
//! - [`product_number`] - Sequential product number rule
//! - [`statistics`] - Daily sales report math and mail template
//! - [`dto`] - Request/response shapes shared with the frontend
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::product_number::next_product_number;
//!
//! assert_eq!(next_product_number(None).unwrap(), "001");
//! assert_eq!(next_product_number(Some("009")).unwrap(), "010");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod money;
pub mod product_number;
pub mod statistics;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kiosk_core::Money` instead of
// `use kiosk_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest accepted product price, in won.
pub const MAX_PRODUCT_PRICE: i64 = 100_000_000;

/// Width of a zero-padded product number ("001").
pub const PRODUCT_NUMBER_WIDTH: usize = 3;
