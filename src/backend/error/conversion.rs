/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so handlers return them
 * directly. The body uses the same envelope as successful responses:
 *
 * ```json
 * { "success": false, "message": "Post not found" }
 * ```
 *
 * Server-side failures are logged here with their full detail before the
 * generic message goes out.
 *
 * Extractor rejections convert into a 400 with the same envelope; handlers
 * take their `Json`, `Path` and `Query` inputs through
 * `axum_extra::extract::WithRejection<_, BackendError>`.
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, message);
        }

        let body = serde_json::json!({
            "success": false,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        BackendError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::bad_request(rejection.body_text())
    }
}
