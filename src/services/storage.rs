// SPDX-License-Identifier: MIT

//! Object storage client for avatar blobs.
//!
//! Handles:
//! - Precondition checks before any upload call (content type, size cap)
//! - Blob upload into the `avatars` bucket
//! - Public URL resolution
//! - Prefix deletion of a user's blobs during account deletion

use crate::error::AppError;
use futures_util::{stream, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

/// Bucket holding all avatar blobs.
const AVATAR_BUCKET: &str = "avatars";

/// Maximum accepted avatar size (2 MiB).
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

const MAX_CONCURRENT_STORAGE_OPS: usize = 8;

/// Storage API client. Cheap to clone; shares one HTTP pool.
#[derive(Clone)]
pub struct StorageService {
    inner: Option<Inner>,
}

#[derive(Clone)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// Object listing entry from the storage API.
#[derive(Debug, Deserialize)]
struct ObjectEntry {
    name: String,
}

/// Check the avatar preconditions. Rejections here mean no upload call
/// is ever issued and no side effect occurs.
pub fn validate_avatar(content_type: Option<&str>, size: usize) -> Result<(), AppError> {
    match content_type {
        Some(ct) if ct.starts_with("image/") => {}
        _ => {
            return Err(AppError::BadRequest(
                "Please select an image file".to_string(),
            ))
        }
    }

    if size > MAX_AVATAR_BYTES {
        return Err(AppError::BadRequest(
            "Image must not exceed 2 MiB".to_string(),
        ));
    }

    Ok(())
}

/// Build a unique blob name: user id, a random suffix, the original
/// extension. The user-id prefix is what account deletion sweeps by.
pub fn avatar_object_name(user_id: Uuid, original_filename: &str) -> String {
    let extension = std::path::Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
        .to_ascii_lowercase();

    format!("{}-{}.{}", user_id, Uuid::new_v4(), extension)
}

impl StorageService {
    /// Create a new storage client against a Supabase project.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            inner: Some(Inner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                service_key: service_key.to_string(),
            }),
        }
    }

    /// Create a mock storage client for testing (offline mode).
    pub fn new_mock() -> Self {
        Self { inner: None }
    }

    fn get_client(&self) -> Result<&Inner, AppError> {
        self.inner
            .as_ref()
            .ok_or_else(|| AppError::Storage("Storage not connected (offline mode)".to_string()))
    }

    /// Upload one blob into the avatars bucket.
    pub async fn upload_avatar(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            client.base_url,
            AVATAR_BUCKET,
            urlencoding::encode(object_name)
        );

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        check_response(response).await
    }

    /// Resolve the public URL of a blob in the avatars bucket.
    pub fn public_url(&self, object_name: &str) -> Result<String, AppError> {
        let client = self.get_client()?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            client.base_url,
            AVATAR_BUCKET,
            urlencoding::encode(object_name)
        ))
    }

    /// List every blob in the avatars bucket belonging to a user.
    pub async fn list_user_avatars(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/storage/v1/object/list/{}", client.base_url, AVATAR_BUCKET);

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .json(&serde_json::json!({
                "prefix": "",
                "search": format!("{}-", user_id),
            }))
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let entries: Vec<ObjectEntry> = check_response_json(response).await?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    /// Delete all of a user's avatar blobs.
    ///
    /// Uses concurrent deletes with a limit to avoid hammering the
    /// storage API. Returns the number of blobs deleted.
    pub async fn delete_user_avatars(&self, user_id: Uuid) -> Result<usize, AppError> {
        let objects = self.list_user_avatars(user_id).await?;
        let count = objects.len();
        let client = self.get_client()?;

        stream::iter(objects)
            .map(|name| async move {
                let url = format!(
                    "{}/storage/v1/object/{}/{}",
                    client.base_url,
                    AVATAR_BUCKET,
                    urlencoding::encode(&name)
                );

                let response = client
                    .http
                    .delete(&url)
                    .header("apikey", &client.service_key)
                    .bearer_auth(&client.service_key)
                    .send()
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;

                check_response(response).await
            })
            .buffer_unordered(MAX_CONCURRENT_STORAGE_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(%user_id, count, "Deleted avatar blobs");

        Ok(count)
    }
}

/// Check response status and return an error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Storage(format!("HTTP {}: {}", status, body)))
}

/// Check response and parse the JSON body.
async fn check_response_json<T: for<'de> serde::Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Storage(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Storage(format!("JSON parse error: {}", e)))
}
