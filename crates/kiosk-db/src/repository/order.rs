//! # Order Repository
//!
//! Database operations for orders and their lines.
//!
//! ## Transaction Flow
//! ```text
//! place(NewOrder)
//!      │
//!      ▼
//! ┌─────────────────────────────────────────────┐
//! │  BEGIN                                      │
//! │  INSERT INTO orders ... RETURNING *         │
//! │  INSERT INTO order_products (per line)      │
//! │  COMMIT                                     │
//! └─────────────────────────────────────────────┘
//!      │
//!      ▼
//! Order (or nothing at all if any line failed)
//! ```

use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kiosk_core::{NewOrder, Order, OrderProduct, OrderStatus, Product};

const ORDER_COLUMNS: &str =
    "id, order_status, total_price, registered_date_time, created_at, updated_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores an order and one `order_products` row per line, atomically.
    ///
    /// ## Arguments
    /// * `order` - priced order; `order.products` must already be stored
    ///
    /// ## Errors
    /// [`DbError::ForeignKeyViolation`] if a line references a missing
    /// product. Nothing is written in that case.
    pub async fn place(&self, order: &NewOrder) -> DbResult<Order> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let stored = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (
                order_status, total_price, registered_date_time, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.order_status)
        .bind(order.total_price.won())
        .bind(order.registered_date_time)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for product in &order.products {
            sqlx::query(
                r#"
                INSERT INTO order_products (order_id, product_id, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?3)
                "#,
            )
            .bind(stored.id)
            .bind(product.id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id = stored.id,
            lines = order.products.len(),
            total_price = stored.total_price,
            "Order stored"
        );

        Ok(stored)
    }

    /// Gets an order by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Orders in `status` registered within `[start, end)`, by id.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let (start, end) = kiosk_core::statistics::day_range(date)?;
    /// let sales = repo
    ///     .find_orders_by(start, end, OrderStatus::PaymentCompleted)
    ///     .await?;
    /// ```
    pub async fn find_orders_by(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: OrderStatus,
    ) -> DbResult<Vec<Order>> {
        debug!(%start, %end, ?status, "Finding orders in range");

        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE order_status = ?1
              AND registered_date_time >= ?2
              AND registered_date_time < ?3
            ORDER BY id
            "#
        ))
        .bind(status)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = orders.len(), "Orders in range");
        Ok(orders)
    }

    /// Products of an order in line order, one entry per line.
    pub async fn find_products_of_order(&self, order_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.product_number, p.product_type, p.selling_status,
                   p.name, p.price, p.created_at, p.updated_at
            FROM order_products op
            INNER JOIN products p ON p.id = op.product_id
            WHERE op.order_id = ?1
            ORDER BY op.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Raw line rows of an order.
    pub async fn find_lines(&self, order_id: i64) -> DbResult<Vec<OrderProduct>> {
        let lines = sqlx::query_as::<_, OrderProduct>(
            r#"
            SELECT id, order_id, product_id, created_at, updated_at
            FROM order_products
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Deletes an order; its lines go with it.
    ///
    /// ## Returns
    /// * `Ok(false)` - no order with that id
    pub async fn delete(&self, order_id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::NaiveDate;
    use kiosk_core::{Money, NewProduct, ProductSellingStatus, ProductType};

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    async fn setup() -> (Database, Vec<Product>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut products = Vec::new();
        for (number, price) in [("001", 1000), ("002", 3000), ("003", 5000)] {
            let product = db
                .products()
                .insert(&NewProduct {
                    product_number: number.to_string(),
                    product_type: ProductType::Handmade,
                    selling_status: ProductSellingStatus::Selling,
                    name: format!("Menu {number}"),
                    price: Money::from_won(price),
                })
                .await
                .unwrap();
            products.push(product);
        }
        (db, products)
    }

    #[tokio::test]
    async fn test_place_stores_order_and_lines() {
        let (db, products) = setup().await;
        let lines = vec![products[0].clone(), products[1].clone(), products[0].clone()];

        let order = db
            .orders()
            .place(&NewOrder::create(lines, at(1, 10, 0, 0)).unwrap())
            .await
            .unwrap();

        assert_eq!(order.order_status, OrderStatus::Init);
        assert_eq!(order.total_price, 5000);
        assert_eq!(order.registered_date_time, at(1, 10, 0, 0));

        let stored_products = db.orders().find_products_of_order(order.id).await.unwrap();
        let numbers: Vec<&str> = stored_products
            .iter()
            .map(|p| p.product_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["001", "002", "001"]);
    }

    #[tokio::test]
    async fn test_place_is_atomic() {
        let (db, products) = setup().await;
        let mut ghost = products[0].clone();
        ghost.id = 9999;

        let err = db
            .orders()
            .place(&NewOrder::create(vec![products[1].clone(), ghost], at(1, 10, 0, 0)).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "unexpected {err}");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_find_orders_by_range_and_status() {
        let (db, products) = setup().await;
        let orders = db.orders();

        let completed = orders
            .place(&NewOrder::with_status(
                OrderStatus::PaymentCompleted,
                vec![products[0].clone(), products[1].clone()],
                at(1, 10, 0, 0),
            ).unwrap())
            .await
            .unwrap();
        orders
            .place(&NewOrder::with_status(
                OrderStatus::Canceled,
                vec![products[2].clone()],
                at(1, 11, 0, 0),
            ).unwrap())
            .await
            .unwrap();
        orders
            .place(&NewOrder::with_status(
                OrderStatus::PaymentCompleted,
                vec![products[2].clone()],
                at(2, 0, 0, 0),
            ).unwrap())
            .await
            .unwrap();

        let found = orders
            .find_orders_by(at(1, 0, 0, 0), at(2, 0, 0, 0), OrderStatus::PaymentCompleted)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, completed.id);
        assert_eq!(found[0].total_price, 4000);
    }

    #[tokio::test]
    async fn test_range_includes_last_second_of_day() {
        let (db, products) = setup().await;
        let orders = db.orders();

        orders
            .place(&NewOrder::with_status(
                OrderStatus::PaymentCompleted,
                vec![products[0].clone()],
                at(1, 23, 59, 59),
            ).unwrap())
            .await
            .unwrap();

        let found = orders
            .find_orders_by(at(1, 0, 0, 0), at(2, 0, 0, 0), OrderStatus::PaymentCompleted)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_lines() {
        let (db, products) = setup().await;
        let order = db
            .orders()
            .place(&NewOrder::create(products.clone(), at(1, 9, 0, 0)).unwrap())
            .await
            .unwrap();
        assert_eq!(db.orders().find_lines(order.id).await.unwrap().len(), 3);

        assert!(db.orders().delete(order.id).await.unwrap());

        assert!(db.orders().find_by_id(order.id).await.unwrap().is_none());
        assert!(db.orders().find_lines(order.id).await.unwrap().is_empty());
        assert!(!db.orders().delete(order.id).await.unwrap());
    }
}
