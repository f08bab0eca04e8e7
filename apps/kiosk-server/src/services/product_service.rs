//! Product registration and menu listing.
//!
//! ## Numbering
//! ```text
//! create_product(request)
//!      │
//!      ▼
//! validate ──► ProductDraft
//!      │
//!      ▼
//! ┌──────────────────────────────────────────────┐
//! │  latest = find_latest_product_number()       │◄─────┐
//! │  number = next_product_number(latest)        │      │ backoff
//! │  insert(draft + number)                      │      │ (UNIQUE lost)
//! └──────────────────────────────────────────────┘──────┘
//!      │
//!      ▼
//! ProductResponse
//! ```
//!
//! Two concurrent registrations can read the same latest number. The
//! UNIQUE index on `product_number` lets exactly one insert win; the other
//! re-reads and tries again.

use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tracing::{debug, info, warn};

use kiosk_core::dto::{ProductCreateRequest, ProductResponse};
use kiosk_core::product_number::next_product_number;
use kiosk_core::validation::validate_product_create;
use kiosk_core::{Product, ProductDraft, ProductSellingStatus};
use kiosk_db::Database;

use crate::error::{ApiError, ApiResult};

/// Retry settings for product number collisions.
#[derive(Debug, Clone)]
pub struct NumberRetryPolicy {
    /// Total insert attempts, including the first.
    pub max_attempts: u32,

    /// Initial backoff duration.
    pub initial_backoff: Duration,

    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for NumberRetryPolicy {
    fn default() -> Self {
        NumberRetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(200),
        }
    }
}

impl NumberRetryPolicy {
    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_backoff,
            initial_interval: self.initial_backoff,
            max_interval: self.max_backoff,
            multiplier: 2.0,
            max_elapsed_time: None, // bounded by max_attempts
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
    retry: NumberRetryPolicy,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService {
            db,
            retry: NumberRetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: NumberRetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates and registers a product under the next product number.
    ///
    /// ## Errors
    /// * `VALIDATION_ERROR` - one field error per rejected field
    /// * `CONFLICT` - every attempt lost the numbering race
    pub async fn create_product(&self, request: ProductCreateRequest) -> ApiResult<ProductResponse> {
        let draft = validate_product_create(&request)?;
        let product = self.insert_with_next_number(draft).await?;

        info!(
            id = product.id,
            product_number = %product.product_number,
            name = %product.name,
            "Product registered"
        );
        Ok(ProductResponse::from(product))
    }

    /// Products shown on the kiosk menu (SELLING and HOLD).
    pub async fn get_selling_products(&self) -> ApiResult<Vec<ProductResponse>> {
        let products = self
            .db
            .products()
            .find_all_by_selling_status_in(ProductSellingStatus::for_display())
            .await?;

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn insert_with_next_number(&self, draft: ProductDraft) -> ApiResult<Product> {
        let products = self.db.products();
        let mut backoff = self.retry.create_backoff();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let latest = products.find_latest_product_number().await?;
            let product_number = next_product_number(latest.as_deref())?;

            match products.insert(&draft.clone().with_number(product_number.clone())).await {
                Ok(product) => return Ok(product),
                Err(e) if e.is_unique_violation() => {
                    if attempt >= self.retry.max_attempts {
                        warn!(attempt, %product_number, "Giving up on product number");
                        return Err(ApiError::conflict(format!(
                            "Could not assign a product number after {} attempts",
                            attempt
                        )));
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            debug!(?duration, attempt, %product_number, "Product number taken, retrying");
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            return Err(ApiError::conflict("Product number retry exhausted"));
                        }
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
