// SPDX-License-Identifier: MIT

//! Error-to-response mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use meetsync_api::error::AppError;

#[tokio::test]
async fn test_error_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
        (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::Auth("x".to_string()), StatusCode::UNAUTHORIZED),
        (
            AppError::Database("x".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::Storage("x".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

#[tokio::test]
async fn test_bad_request_body_carries_details() {
    let response = AppError::BadRequest("price is required".to_string()).into_response();
    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["details"], "price is required");
}

#[tokio::test]
async fn test_internal_errors_hide_details() {
    let response = AppError::Database("connection string leaked".to_string()).into_response();
    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "database_error");
    assert!(json.get("details").is_none());
}
