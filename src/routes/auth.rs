// SPDX-License-Identifier: MIT

//! Authentication routes delegating to the external identity service.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Email/password credentials for sign-up and sign-in.
#[derive(Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Session established for a signed-in user.
#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Register an account, then establish a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state.db.sign_up(&payload.email, &payload.password).await?;

    tracing::info!(user_id = %session.user.id, "New account registered");

    establish_session(&state, jar, session)
}

/// Exchange credentials for a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let session = state.db.sign_in(&payload.email, &payload.password).await?;

    tracing::info!(user_id = %session.user.id, "User signed in");

    establish_session(&state, jar, session)
}

/// Mint the session JWT and set the cookie.
fn establish_session(
    state: &Arc<AppState>,
    jar: CookieJar,
    session: crate::db::supabase::AuthSession,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let jwt = create_jwt(session.user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, jwt))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let response = SessionResponse {
        user_id: session.user.id,
        email: session.user.email.clone(),
        display_name: session.user.display_name().map(str::to_string),
    };

    Ok((jar.add(cookie), Json(response)))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Tear down the session by clearing the cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build();

    (jar.remove(cookie), Json(LogoutResponse { success: true }))
}
