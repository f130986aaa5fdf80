//! Error conversions
//!
//! Rendering of [`AppError`] into HTTP responses.

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Only the user-facing message leaves the process
        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}
