use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;

use kiosk_core::dto::{OrderCreateRequest, OrderResponse, OrderStatisticsMailRequest};
use kiosk_core::validation::validate_statistics_mail;

use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::AppState;

/// `POST /api/v1/orders/new`
///
/// The order is registered at the server's local time of receipt.
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderCreateRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<OrderResponse>> {
    let Json(request) = payload?;
    let registered_date_time = Local::now().naive_local();
    let order = state.orders.create_order(request, registered_date_time).await?;
    Ok(ApiResponse::ok(order))
}

/// `POST /api/v1/orders/statistics/mail`
pub async fn send_order_statistics_mail(
    State(state): State<AppState>,
    payload: Result<Json<OrderStatisticsMailRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<bool>> {
    let Json(request) = payload?;
    let (date, email) = validate_statistics_mail(&request)?;
    let sent = state
        .statistics
        .send_order_statistics_mail(date, &email)
        .await?;
    Ok(ApiResponse::ok(sent))
}
