//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Menu listing by selling status
//! - Lookup by product number (order placement)
//! - Latest product number (numbering rule input)
//! - Insert with `RETURNING`
//!
//! ## Product Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a new product gets "004"                         │
//! │                                                                         │
//! │  find_latest_product_number()                                          │
//! │       │   SELECT product_number ... ORDER BY id DESC LIMIT 1            │
//! │       ▼                                                                 │
//! │  "003" ──► kiosk_core::product_number::next_product_number ──► "004"   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert(NewProduct { product_number: "004", .. })                      │
//! │       │                                                                 │
//! │       ├── OK ──► Product                                                │
//! │       └── UNIQUE products.product_number ──► DbError::UniqueViolation   │
//! │               (another creation won the race; caller retries)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use kiosk_core::{NewProduct, Product, ProductSellingStatus};

const PRODUCT_COLUMNS: &str =
    "id, product_number, product_type, selling_status, name, price, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let menu = repo
///     .find_all_by_selling_status_in(ProductSellingStatus::for_display())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products whose selling status is one of `statuses`, by id.
    ///
    /// An empty status list matches nothing.
    pub async fn find_all_by_selling_status_in(
        &self,
        statuses: &[ProductSellingStatus],
    ) -> DbResult<Vec<Product>> {
        debug!(?statuses, "Listing products by selling status");

        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE selling_status IN ("
        ));
        let mut separated = query.separated(", ");
        for status in statuses {
            separated.push_bind(*status);
        }
        separated.push_unseparated(") ORDER BY id");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Selling status query returned products");
        Ok(products)
    }

    /// Loads the distinct products carrying any of `product_numbers`.
    ///
    /// Each stored product appears once even if its number is repeated in
    /// the input. Unknown numbers are simply absent from the result.
    pub async fn find_all_by_product_number_in(
        &self,
        product_numbers: &[String],
    ) -> DbResult<Vec<Product>> {
        debug!(count = product_numbers.len(), "Loading products by number");

        if product_numbers.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_number IN ("
        ));
        let mut separated = query.separated(", ");
        for number in product_numbers {
            separated.push_bind(number.as_str());
        }
        separated.push_unseparated(") ORDER BY id");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by its record id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Number of the most recently stored product (highest id).
    ///
    /// ## Returns
    /// * `Ok(None)` - the catalog is empty
    pub async fn find_latest_product_number(&self) -> DbResult<Option<String>> {
        let latest: Option<String> = sqlx::query_scalar(
            "SELECT product_number FROM products ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        debug!(latest = ?latest, "Latest product number");
        Ok(latest)
    }

    /// Inserts a new product and returns the stored row.
    ///
    /// ## Errors
    /// [`crate::DbError::UniqueViolation`] when the product number is taken.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let now = Utc::now();

        debug!(product_number = %product.product_number, name = %product.name, "Inserting product");

        let stored = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                product_number, product_type, selling_status, name, price,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.product_number)
        .bind(product.product_type)
        .bind(product.selling_status)
        .bind(&product.name)
        .bind(product.price.won())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
