//! The response envelope shared by every endpoint.
//!
//! Success bodies carry `{"success": true, "message": ..., "data": ...}`;
//! failures mirror the shape with `success: false`, `data: null` and a
//! machine-readable `error` code derived from the error class.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bursary_shared::AppError;

/// A `200 OK` envelope.
pub fn ok(message: &str, data: serde_json::Value) -> Response {
    envelope(StatusCode::OK, message, data)
}

/// A `201 Created` envelope.
pub fn created(message: &str, data: serde_json::Value) -> Response {
    envelope(StatusCode::CREATED, message, data)
}

/// A failure envelope. The error class fixes the status code.
pub fn fail(error: &AppError) -> Response {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "success": false,
            "message": error.to_string(),
            "error": error.error_code(),
            "data": null
        })),
    )
        .into_response()
}

fn envelope(status: StatusCode, message: &str, data: serde_json::Value) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": data
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status() {
        let response = ok("done", json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_created_status() {
        let response = created("created", serde_json::Value::Null);
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_fail_maps_error_class_to_status() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidState("closed".into()), StatusCode::CONFLICT),
            (
                AppError::Storage("db".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(fail(&error).status(), status);
        }
    }
}
