//! Success envelope shared by every JSON endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// `{code, status, message, data}` wrapper.
///
/// ```json
/// { "code": 200, "status": "OK", "message": "OK", "data": { "id": 1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 200 OK with `data`.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            code: StatusCode::OK.as_u16(),
            status: "OK".to_string(),
            message: "OK".to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
