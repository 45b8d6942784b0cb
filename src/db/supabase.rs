// SPDX-License-Identifier: MIT

//! Supabase client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Identity records (sign-up/sign-in, admin read/patch/delete)
//! - Profiles (row read)
//! - Events (insert, owner listing)
//! - Event participations (joined read for export)
//!
//! Every operation is a single unmediated call to the external service;
//! there is no retry, caching, or batching layer here.

use crate::db::tables;
use crate::error::AppError;
use crate::models::{AuthUserRecord, EventRecord, Participation, Profile};
use serde::Deserialize;
use uuid::Uuid;

/// Supabase client. Cheap to clone; all requests share one HTTP pool.
#[derive(Clone)]
pub struct SupabaseDb {
    inner: Option<Inner>,
}

#[derive(Clone)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// Session returned by the identity service on sign-up / sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUserRecord,
}

impl SupabaseDb {
    /// Create a new client against a Supabase project.
    ///
    /// The service-role key is used for every call; row-level security is
    /// enforced by scoping each query to the session user instead.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            inner: Some(Inner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                service_key: service_key.to_string(),
            }),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { inner: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&Inner, AppError> {
        self.inner
            .as_ref()
            .ok_or_else(|| AppError::Database("Backend not connected (offline mode)".to_string()))
    }

    // ─── Identity Operations ─────────────────────────────────────

    /// Register a new account with the identity service.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/signup", client.base_url);

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.service_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        check_response_json(response, auth_error).await
    }

    /// Exchange email/password credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/token?grant_type=password", client.base_url);

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.service_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        check_response_json(response, auth_error).await
    }

    /// Read the identity record for a user.
    pub async fn get_auth_user(&self, user_id: Uuid) -> Result<AuthUserRecord, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/admin/users/{}", client.base_url, user_id);

        let response = client
            .http
            .get(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        check_response_json(response, auth_error).await
    }

    /// Patch the user's metadata object (merge semantics on the service).
    ///
    /// Used by the avatar workflow to store the new public URL.
    pub async fn update_user_metadata(
        &self,
        user_id: Uuid,
        metadata: serde_json::Value,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/admin/users/{}", client.base_url, user_id);

        let response = client
            .http
            .put(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .json(&serde_json::json!({ "user_metadata": metadata }))
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        check_response(response, auth_error).await
    }

    /// Permanently delete the identity record.
    pub async fn delete_auth_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let client = self.get_client()?;
        let url = format!("{}/auth/v1/admin/users/{}", client.base_url, user_id);

        let response = client
            .http
            .delete(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        check_response(response, auth_error).await
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user's profile row.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let rows: Vec<Profile> = self
            .select(tables::PROFILES, &format!("id=eq.{}&select=*", user_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    // ─── Event Operations ────────────────────────────────────────

    /// Insert one event row and return the stored record.
    pub async fn insert_event(&self, event: &EventRecord) -> Result<EventRecord, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/rest/v1/{}", client.base_url, tables::EVENTS);

        let response = client
            .http
            .post(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .header("Prefer", "return=representation")
            .json(event)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rows: Vec<EventRecord> = check_response_json(response, db_error).await?;
        rows.pop()
            .ok_or_else(|| AppError::Database("Insert returned no representation".to_string()))
    }

    /// Get all events created by a user, newest first.
    pub async fn get_events_for_owner(&self, user_id: Uuid) -> Result<Vec<EventRecord>, AppError> {
        self.select(
            tables::EVENTS,
            &format!("owner_id=eq.{}&select=*&order=event_date.desc", user_id),
        )
        .await
    }

    /// Get a user's participations with each related event embedded.
    pub async fn get_participations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Participation>, AppError> {
        let query = format!(
            "user_id=eq.{}&select={}",
            user_id,
            urlencoding::encode("*,meeting:events(*)")
        );
        self.select(tables::EVENT_PARTICIPANTS, &query).await
    }

    // ─── User Data Deletion (GDPR) ───────────────────────────────

    /// Delete ALL rows belonging to a user.
    ///
    /// Deletes, in order:
    /// - `event_participants` (by user_id)
    /// - `events` (by owner_id)
    /// - `profiles/{user_id}`
    ///
    /// The identity record and stored avatar blobs are deleted separately
    /// by the caller; a failure partway leaves earlier deletions in place.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete_user_data(&self, user_id: Uuid) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        let count = self
            .delete_rows(tables::EVENT_PARTICIPANTS, "user_id", user_id)
            .await?;
        deleted_count += count;
        tracing::debug!(%user_id, count, "Deleted participation rows");

        let count = self.delete_rows(tables::EVENTS, "owner_id", user_id).await?;
        deleted_count += count;
        tracing::debug!(%user_id, count, "Deleted event rows");

        let count = self.delete_rows(tables::PROFILES, "id", user_id).await?;
        deleted_count += count;
        tracing::debug!(%user_id, count, "Deleted profile row");

        tracing::info!(%user_id, deleted_count, "User row deletion complete");

        Ok(deleted_count)
    }

    // ─── Helper Methods ──────────────────────────────────────────

    /// Generic filtered SELECT against one table.
    async fn select<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, AppError> {
        let client = self.get_client()?;
        let url = format!("{}/rest/v1/{}?{}", client.base_url, table, query);

        let response = client
            .http
            .get(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        check_response_json(response, db_error).await
    }

    /// Delete rows matching `column = user_id`, returning how many went.
    async fn delete_rows(
        &self,
        table: &str,
        column: &str,
        user_id: Uuid,
    ) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let url = format!(
            "{}/rest/v1/{}?{}=eq.{}",
            client.base_url, table, column, user_id
        );

        let response = client
            .http
            .delete(&url)
            .header("apikey", &client.service_key)
            .bearer_auth(&client.service_key)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<serde_json::Value> = check_response_json(response, db_error).await?;
        Ok(rows.len())
    }
}

fn auth_error(msg: String) -> AppError {
    AppError::Auth(msg)
}

fn db_error(msg: String) -> AppError {
    AppError::Database(msg)
}

/// Check response status and return an error if not successful.
async fn check_response(
    response: reqwest::Response,
    to_error: fn(String) -> AppError,
) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(to_error(format!("HTTP {}: {}", status, body)))
}

/// Check response and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    to_error: fn(String) -> AppError,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(to_error(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| to_error(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_mode_errors() {
        let db = SupabaseDb::new_mock();
        let err = db.get_profile(Uuid::nil()).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
