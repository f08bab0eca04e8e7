//! Order placement.
//!
//! Orders name their lines by product number. A number may repeat; each
//! occurrence is its own line and is priced separately.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use kiosk_core::dto::{OrderCreateRequest, OrderResponse};
use kiosk_core::validation::validate_order_create;
use kiosk_core::{CoreError, NewOrder, Product};
use kiosk_db::Database;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct OrderService {
    db: Database,
}

impl OrderService {
    pub fn new(db: Database) -> Self {
        OrderService { db }
    }

    /// Places an order registered at `registered_date_time`.
    ///
    /// The order and its lines are stored in one transaction, in status
    /// `INIT`, priced at the current product prices.
    ///
    /// ## Errors
    /// * `VALIDATION_ERROR` - no product numbers, or a blank one
    /// * `NOT_FOUND` - a number matches no product
    /// * `BUSINESS_LOGIC` - the total does not fit in the money range
    pub async fn create_order(
        &self,
        request: OrderCreateRequest,
        registered_date_time: NaiveDateTime,
    ) -> ApiResult<OrderResponse> {
        let product_numbers = validate_order_create(&request)?;
        let products = self.find_products_by(&product_numbers).await?;
        let new_order = NewOrder::create(products.clone(), registered_date_time)?;

        let order = self.db.orders().place(&new_order).await?;

        info!(
            order_id = order.id,
            lines = products.len(),
            total_price = order.total_price,
            "Order placed"
        );
        Ok(OrderResponse::of(&order, &products))
    }

    /// One product per requested number, in request order.
    async fn find_products_by(&self, product_numbers: &[String]) -> ApiResult<Vec<Product>> {
        let found = self
            .db
            .products()
            .find_all_by_product_number_in(product_numbers)
            .await?;
        debug!(requested = product_numbers.len(), distinct = found.len(), "Loaded order products");

        let by_number: HashMap<&str, &Product> = found
            .iter()
            .map(|p| (p.product_number.as_str(), p))
            .collect();

        product_numbers
            .iter()
            .map(|number| {
                by_number
                    .get(number.as_str())
                    .map(|p| (*p).clone())
                    .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(number.clone())))
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
