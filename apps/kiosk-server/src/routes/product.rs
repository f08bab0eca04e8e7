use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use kiosk_core::dto::{ProductCreateRequest, ProductResponse};

use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::AppState;

/// `POST /api/v1/products/new`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductCreateRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<ProductResponse>> {
    let Json(request) = payload?;
    let product = state.products.create_product(request).await?;
    Ok(ApiResponse::ok(product))
}

/// `GET /api/v1/products/selling`
pub async fn get_selling_products(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<ProductResponse>>> {
    let products = state.products.get_selling_products().await?;
    Ok(ApiResponse::ok(products))
}
