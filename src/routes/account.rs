// SPDX-License-Identifier: MIT

//! Account routes: profile read, avatar replacement, data export,
//! account deletion.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::{SessionUser, SESSION_COOKIE};
use crate::models::{AccountTier, ExportProfile, RenewInterval};
use crate::services::export::{assemble_export, export_filename};
use crate::services::storage::{avatar_object_name, validate_avatar, MAX_AVATAR_BYTES};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route(
            "/api/me/avatar",
            post(upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 64 * 1024)),
        )
        .route("/api/me/export", get(export_data))
        .route("/api/account/deletion-preview", get(deletion_preview))
        .route("/api/account", delete(delete_account))
}

// ─── Profile ─────────────────────────────────────────────────

/// Current user response: identity record plus profile row.
#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Authentication provider (`email`, `google`, ...)
    pub provider: Option<String>,
    pub account_type: AccountTier,
    pub renew_type: RenewInterval,
    pub created_at: Option<String>,
}

/// Get the current user's account metadata.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<MeResponse>> {
    let user = state.db.get_auth_user(session.user_id).await?;
    let profile = state
        .db
        .get_profile(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", session.user_id)))?;

    Ok(Json(MeResponse {
        user_id: user.id,
        email: user.email.clone(),
        display_name: user.display_name().map(str::to_string),
        // The metadata URL wins: it is what the avatar workflow patches
        avatar_url: user
            .avatar_url()
            .map(str::to_string)
            .or(profile.avatar_url),
        provider: user.provider().map(str::to_string),
        account_type: profile.account_type,
        renew_type: profile.renew_type,
        created_at: user.created_at,
    }))
}

// ─── Avatar Replacement ──────────────────────────────────────

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

/// Replace the user's avatar.
///
/// Preconditions (image content type, ≤ 2 MiB) are checked before any
/// upload call. The steps run sequentially with no rollback: a metadata
/// patch failure after a successful upload leaves the blob orphaned.
async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let filename = field.file_name().unwrap_or("avatar").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read upload: {}", e)))?;

        validate_avatar(content_type.as_deref(), bytes.len())?;

        // Step 1: upload under a unique name
        let object_name = avatar_object_name(session.user_id, &filename);
        let content_type = content_type.unwrap_or_else(|| "image/png".to_string());
        state
            .storage
            .upload_avatar(&object_name, &content_type, bytes.to_vec())
            .await?;

        // Step 2: resolve the public URL
        let avatar_url = state.storage.public_url(&object_name)?;

        // Step 3: patch the identity record
        state
            .db
            .update_user_metadata(
                session.user_id,
                serde_json::json!({ "avatar_url": avatar_url }),
            )
            .await?;

        tracing::info!(user_id = %session.user_id, object = %object_name, "Avatar replaced");

        return Ok(Json(AvatarResponse { avatar_url }));
    }

    Err(AppError::BadRequest(
        "Missing 'avatar' file field".to_string(),
    ))
}

// ─── Data Export ─────────────────────────────────────────────

/// Produce a downloadable snapshot of the user's data.
///
/// The identity record and profile row are mandatory; the event and
/// participation fetches degrade independently to empty sections.
async fn export_data(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Response> {
    let user = state.db.get_auth_user(session.user_id).await?;
    let profile = state
        .db
        .get_profile(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", session.user_id)))?;

    let created_meetings = state.db.get_events_for_owner(session.user_id).await;
    let participations = state.db.get_participations_for_user(session.user_id).await;

    let document = assemble_export(
        ExportProfile::new(profile, &user),
        created_meetings,
        participations,
    );

    let body = serde_json::to_vec_pretty(&document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Export serialization failed: {}", e)))?;

    let filename = export_filename(chrono::Utc::now().date_naive());

    tracing::info!(
        user_id = %session.user_id,
        events = document.created_meetings.len(),
        participations = document.meeting_participations.len(),
        "Data export produced"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

// ─── Account Deletion ────────────────────────────────────────

/// What an account deletion would remove. Read-only; serves the
/// confirmation dialog. Cancelling the dialog issues no further call.
#[derive(Serialize)]
pub struct DeletionPreviewResponse {
    pub profile: bool,
    pub created_meetings: usize,
    pub meeting_participations: usize,
    pub avatars: usize,
}

async fn deletion_preview(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<DeletionPreviewResponse>> {
    let profile = state.db.get_profile(session.user_id).await?;
    let events = state.db.get_events_for_owner(session.user_id).await?;
    let participations = state.db.get_participations_for_user(session.user_id).await?;
    let avatars = state.storage.list_user_avatars(session.user_id).await?;

    Ok(Json(DeletionPreviewResponse {
        profile: profile.is_some(),
        created_meetings: events.len(),
        meeting_participations: participations.len(),
        avatars: avatars.len(),
    }))
}

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub rows_deleted: usize,
    pub avatars_deleted: usize,
    pub message: String,
}

/// Delete the account and all associated data, then sign out.
///
/// Order: avatar blobs, rows (participations, events, profile), then the
/// identity record. Any failure aborts with an error and leaves the
/// session intact so the user can re-trigger.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<DeleteAccountResponse>)> {
    tracing::info!(user_id = %session.user_id, "User-initiated account deletion");

    let avatars_deleted = state.storage.delete_user_avatars(session.user_id).await?;
    let rows_deleted = state.db.delete_user_data(session.user_id).await?;
    state.db.delete_auth_user(session.user_id).await?;

    tracing::info!(
        user_id = %session.user_id,
        rows_deleted,
        avatars_deleted,
        "Account deletion complete"
    );

    // Terminal state: signed out
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();

    Ok((
        jar.remove(cookie),
        Json(DeleteAccountResponse {
            success: true,
            rows_deleted,
            avatars_deleted,
            message: "Account deleted. All data has been removed.".to_string(),
        }),
    ))
}
