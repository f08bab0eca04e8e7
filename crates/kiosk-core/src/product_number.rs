//! # Product Number Rule
//!
//! Products carry a human-facing number next to their record id. Numbers are
//! assigned sequentially from the most recently stored product.
//!
//! ```text
//! latest stored  │  next
//! ───────────────┼────────
//! (none)         │  "001"
//! "001"          │  "002"
//! "099"          │  "100"
//! "999"          │  "1000"   (padding is a minimum width)
//! ```
//!
//! Two concurrent creations can read the same latest number. The database
//! keeps `product_number` UNIQUE and the product service retries on
//! conflict, so this module stays a pure function.

use crate::error::{CoreError, CoreResult};
use crate::PRODUCT_NUMBER_WIDTH;

/// Returns the number to assign to the next product.
///
/// `latest` is the number of the last stored product, `None` for an empty
/// catalog.
///
/// # Errors
/// [`CoreError::InvalidProductNumber`] when `latest` is not a non-negative
/// decimal integer.
pub fn next_product_number(latest: Option<&str>) -> CoreResult<String> {
    let Some(latest) = latest else {
        return Ok(format_product_number(1));
    };

    let current: u64 = latest
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidProductNumber(latest.to_string()))?;

    let next = current
        .checked_add(1)
        .ok_or_else(|| CoreError::InvalidProductNumber(latest.to_string()))?;

    Ok(format_product_number(next))
}

/// Zero-pads a sequence value to the product number width.
pub fn format_product_number(value: u64) -> String {
    format!("{:0width$}", value, width = PRODUCT_NUMBER_WIDTH)
}
