//! # Data Transfer Objects
//!
//! Request and response bodies of the kiosk HTTP API. They live in core so
//! that `ts-rs` exports one set of TypeScript types for the kiosk frontend
//! and so validation can run on them without touching I/O.
//!
//! Requests deserialize leniently: a missing or null field becomes `None`
//! and is reported by [`crate::validation`] with a field message instead of
//! a JSON parse error.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Order, Product, ProductSellingStatus, ProductType};

// =============================================================================
// Product
// =============================================================================

/// Body of `POST /api/v1/products/new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    #[serde(rename = "type", default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub selling_status: Option<ProductSellingStatus>,
    #[serde(default)]
    pub name: Option<String>,
    /// Integers outside `i64` saturate so the range check reports them.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<i64>,
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole number of won")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(i64::try_from(v).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() && v.fract() == 0.0 {
                // `as` saturates at the i64 bounds
                Ok(Some(v as i64))
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_option(PriceVisitor)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_number: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub selling_status: ProductSellingStatus,
    pub name: String,
    pub price: i64,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        ProductResponse {
            id: product.id,
            product_number: product.product_number.clone(),
            product_type: product.product_type,
            selling_status: product.selling_status,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            product_number: product.product_number,
            product_type: product.product_type,
            selling_status: product.selling_status,
            name: product.name,
            price: product.price,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Body of `POST /api/v1/orders/new`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    /// Product numbers, one entry per line item. Repeats are separate lines.
    #[serde(default)]
    pub product_numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub total_price: i64,
    #[ts(as = "String")]
    pub registered_date_time: NaiveDateTime,
    pub products: Vec<ProductResponse>,
}

impl OrderResponse {
    /// Builds the response from a stored order and its line products, in
    /// line order.
    pub fn of(order: &Order, products: &[Product]) -> Self {
        OrderResponse {
            id: order.id,
            total_price: order.total_price,
            registered_date_time: order.registered_date_time,
            products: products.iter().map(ProductResponse::from).collect(),
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Body of `POST /api/v1/orders/statistics/mail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatisticsMailRequest {
    /// Calendar day to report on, `YYYY-MM-DD`.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
}
