// SPDX-License-Identifier: MIT

//! Avatar replacement precondition tests.
//!
//! Files that are not images or exceed 2 MiB must be rejected with 400
//! before any upload call is issued. With the offline mock storage, an
//! upload that passes the preconditions fails with 500 instead.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

const BOUNDARY: &str = "test-boundary-7e9a1c";
const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Build a single-field multipart body.
fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(field: &str, filename: &str, content_type: &str, data: &[u8]) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/me/avatar")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(field, filename, content_type, data)))
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

#[tokio::test]
async fn test_non_image_content_type_is_rejected() {
    let status = upload("avatar", "resume.pdf", "application/pdf", b"%PDF-1.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let data = vec![0u8; MAX_AVATAR_BYTES + 1];
    let status = upload("avatar", "big.png", "image/png", &data).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_at_size_limit_passes_preconditions() {
    let data = vec![0u8; MAX_AVATAR_BYTES];
    let status = upload("avatar", "edge.png", "image/png", &data).await;
    // Preconditions pass; the offline mock storage fails the upload call
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_small_image_passes_preconditions() {
    let status = upload("avatar", "photo.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF]).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_avatar_field_is_rejected() {
    let status = upload("document", "photo.jpg", "image/jpeg", &[0xFF, 0xD8]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_avatar_upload_requires_session() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/me/avatar")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(
                    "avatar",
                    "photo.png",
                    "image/png",
                    &[1, 2, 3],
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
