//! # Sales Statistics
//!
//! Pure pieces of the daily sales report: which time window counts as
//! "the day", how the total is summed, and what the mail says.
//!
//! ## Report Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  date = 2024-04-01                                                      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  day_range()  ──►  [2024-04-01 00:00, 2024-04-02 00:00)                 │
//! │     │                                                                   │
//! │     ▼  (db: PAYMENT_COMPLETED orders registered in the window)          │
//! │  DailySalesReport::new(date, &orders)                                   │
//! │     │                                                                   │
//! │     ├── subject: "[Sales statistics] 2024-04-01"                        │
//! │     └── content: "Total sales for the day: 12000 won."                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Order, OrderStatus};

/// Status an order must have to count as a sale.
pub const REPORTED_STATUS: OrderStatus = OrderStatus::PaymentCompleted;

/// Half-open window `[date 00:00, date+1 00:00)` covering one calendar day.
///
/// # Errors
/// [`CoreError::DateOutOfRange`] for the last representable date.
pub fn day_range(date: NaiveDate) -> CoreResult<(NaiveDateTime, NaiveDateTime)> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or(CoreError::DateOutOfRange(date))?;

    Ok((
        date.and_time(NaiveTime::MIN),
        next.and_time(NaiveTime::MIN),
    ))
}

/// Sum of order totals.
///
/// # Errors
/// [`CoreError::AmountOverflow`] if the day's total does not fit in [`Money`].
pub fn total_sales<'a, I>(orders: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = &'a Order>,
{
    Money::checked_sum(orders.into_iter().map(Order::total_price))
        .ok_or(CoreError::AmountOverflow("Daily sales total"))
}

pub fn report_subject(date: NaiveDate) -> String {
    format!("[Sales statistics] {}", date.format("%Y-%m-%d"))
}

pub fn report_content(total: Money) -> String {
    format!("Total sales for the day: {} won.", total)
}

/// A rendered daily report, ready to hand to the mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySalesReport {
    pub date: NaiveDate,
    pub total: Money,
    pub subject: String,
    pub content: String,
}

impl DailySalesReport {
    /// Renders the report for `date` from the orders already selected for
    /// that day.
    pub fn new<'a, I>(date: NaiveDate, orders: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let total = total_sales(orders)?;
        Ok(DailySalesReport {
            date,
            total,
            subject: report_subject(date),
            content: report_content(total),
        })
    }
}
