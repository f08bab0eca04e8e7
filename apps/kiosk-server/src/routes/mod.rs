//! HTTP handlers and the router.
//!
//! | Method | Path                              | Handler                        |
//! |--------|-----------------------------------|--------------------------------|
//! | POST   | `/api/v1/products/new`            | [`product::create_product`]    |
//! | GET    | `/api/v1/products/selling`        | [`product::get_selling_products`] |
//! | POST   | `/api/v1/orders/new`              | [`order::create_order`]        |
//! | POST   | `/api/v1/orders/statistics/mail`  | [`order::send_order_statistics_mail`] |
//! | GET    | `/health`                         | [`health::health`]             |

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod health;
pub mod order;
pub mod product;

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/products/new", post(product::create_product))
        .route("/api/v1/products/selling", get(product::get_selling_products))
        .route("/api/v1/orders/new", post(order::create_order))
        .route(
            "/api/v1/orders/statistics/mail",
            post(order::send_order_statistics_mail),
        )
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
