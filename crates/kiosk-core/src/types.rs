//! # Domain Types
//!
//! Core domain types used throughout the cafe kiosk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │ MailSendHistory │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄─┐│  id (i64)       │   │  id (i64)       │       │
//! │  │  product_number │  ││  order_status   │   │  from / to      │       │
//! │  │  product_type   │  ││  total_price    │   │  subject        │       │
//! │  │  selling_status │  ││  registered_at  │   │  content        │       │
//! │  │  name, price    │  │└────────▲────────┘   │  succeeded      │       │
//! │  └─────────────────┘  │         │ owns       └─────────────────┘       │
//! │                       │ ┌───────┴─────────┐                             │
//! │                       └─┤  OrderProduct   │  one row per line item      │
//! │                         └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │  ProductType    │   │ ProductSellingStatus│   │  OrderStatus    │   │
//! │  │  HANDMADE       │   │  SELLING            │   │  INIT           │   │
//! │  │  BOTTLE         │   │  HOLD               │   │  CANCELED       │   │
//! │  │  BAKERY         │   │  STOP_SELLING       │   │  PAYMENT_*  ... │   │
//! │  └─────────────────┘   └─────────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A product has:
//! - `id`: generated integer - immutable, used for database relations
//! - `product_number`: "001", "002", ... - human-readable, shown on the menu

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product Type
// =============================================================================

/// What kind of item a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// Drinks made to order at the counter.
    Handmade,
    /// Bottled drinks from the fridge.
    Bottle,
    /// Bread and pastries.
    Bakery,
}

impl ProductType {
    /// Human-readable label for menus and receipts.
    pub fn text(&self) -> &'static str {
        match self {
            ProductType::Handmade => "Handmade drink",
            ProductType::Bottle => "Bottled drink",
            ProductType::Bakery => "Bakery",
        }
    }
}

// =============================================================================
// Product Selling Status
// =============================================================================

/// Whether a product is currently offered on the kiosk menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSellingStatus {
    Selling,
    Hold,
    StopSelling,
}

impl ProductSellingStatus {
    /// Statuses that keep a product visible on the menu.
    ///
    /// ## User Workflow
    /// ```text
    /// Kiosk boots ──► GET /api/v1/products/selling
    ///                      │
    ///                      ▼
    ///        status IN for_display()  ← THIS SET
    ///                      │
    ///                      ▼
    ///   SELLING: orderable │ HOLD: shown greyed out │ STOP_SELLING: hidden
    /// ```
    pub const fn for_display() -> &'static [ProductSellingStatus] {
        &[ProductSellingStatus::Selling, ProductSellingStatus::Hold]
    }

    /// Human-readable label.
    pub fn text(&self) -> &'static str {
        match self {
            ProductSellingStatus::Selling => "On sale",
            ProductSellingStatus::Hold => "On hold",
            ProductSellingStatus::StopSelling => "Sale stopped",
        }
    }

    /// Stored/serialized form, as used in SQL `IN (...)` binds.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSellingStatus::Selling => "SELLING",
            ProductSellingStatus::Hold => "HOLD",
            ProductSellingStatus::StopSelling => "STOP_SELLING",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the cafe menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Generated record id.
    pub id: i64,

    /// Sequential, zero-padded business identifier ("001").
    pub product_number: String,

    pub product_type: ProductType,

    pub selling_status: ProductSellingStatus,

    /// Display name shown on the menu.
    pub name: String,

    /// Price in won.
    pub price: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_won(self.price)
    }

    /// Whether the product shows up on the kiosk menu.
    pub fn is_displayed(&self) -> bool {
        ProductSellingStatus::for_display().contains(&self.selling_status)
    }
}

/// A validated creation request that still lacks a product number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub product_type: ProductType,
    pub selling_status: ProductSellingStatus,
    pub name: String,
    pub price: Money,
}

impl ProductDraft {
    pub fn with_number(self, product_number: String) -> NewProduct {
        NewProduct {
            product_number,
            product_type: self.product_type,
            selling_status: self.selling_status,
            name: self.name,
            price: self.price,
        }
    }
}

/// A validated product ready to be inserted.
///
/// The product number is assigned by the caller from
/// [`crate::product_number::next_product_number`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_number: String,
    pub product_type: ProductType,
    pub selling_status: ProductSellingStatus,
    pub name: String,
    pub price: Money,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of an order.
///
/// Only `Init` is produced by this service; the others are set by the
/// payment and pickup flows and read back by the sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Init,
    Canceled,
    PaymentCompleted,
    PaymentFailed,
    Received,
    Completed,
}

impl OrderStatus {
    pub fn text(&self) -> &'static str {
        match self {
            OrderStatus::Init => "Order created",
            OrderStatus::Canceled => "Order canceled",
            OrderStatus::PaymentCompleted => "Payment completed",
            OrderStatus::PaymentFailed => "Payment failed",
            OrderStatus::Received => "Order received",
            OrderStatus::Completed => "Order completed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Init
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub order_status: OrderStatus,
    /// Sum of the ordered products' prices at creation time, in won.
    pub total_price: i64,
    /// Kiosk-local wall-clock time the order was registered.
    #[ts(as = "String")]
    pub registered_date_time: NaiveDateTime,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_won(self.total_price)
    }
}

/// An order that has been priced but not yet stored.
///
/// ## Invariant
/// `total_price` is the sum of `products[i].price` for every line. A product
/// listed twice is two lines and is counted twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_status: OrderStatus,
    pub total_price: Money,
    pub registered_date_time: NaiveDateTime,
    pub products: Vec<Product>,
}

impl NewOrder {
    /// Prices a new order in status `Init`.
    pub fn create(
        products: Vec<Product>,
        registered_date_time: NaiveDateTime,
    ) -> CoreResult<Self> {
        Self::with_status(OrderStatus::Init, products, registered_date_time)
    }

    /// Prices a new order in an explicit status.
    ///
    /// Used by fixtures that need payment-completed orders for reports.
    ///
    /// ## Errors
    /// `AmountOverflow` if the total does not fit in [`Money`].
    pub fn with_status(
        order_status: OrderStatus,
        products: Vec<Product>,
        registered_date_time: NaiveDateTime,
    ) -> CoreResult<Self> {
        let total_price = Money::checked_sum(products.iter().map(Product::price))
            .ok_or(CoreError::AmountOverflow("Order total"))?;

        Ok(NewOrder {
            order_status,
            total_price,
            registered_date_time,
            products,
        })
    }
}

// =============================================================================
// Order Product
// =============================================================================

/// One line of an order. Deleted together with its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderProduct {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Mail Send History
// =============================================================================

/// Audit row for one statistics mail attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MailSendHistory {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub content: String,
    /// Whether the mail client reported the message as sent.
    pub succeeded: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMailSendHistory {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub content: String,
    pub succeeded: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
