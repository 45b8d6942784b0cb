// SPDX-License-Identifier: MIT

//! Event creation and listing routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::SessionUser;
use crate::models::{EventPricing, EventRecord};
use crate::time_utils::parse_event_date;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/events", post(create_event).get(list_events))
}

/// Event creation form fields. Wire names match the external schema
/// (`rue`, `paypal_email`).
#[derive(Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "event name is required"))]
    pub event_name: String,
    /// Date or datetime string; any time component is stripped
    pub event_date: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(rename = "rue")]
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(rename = "paypal_email", default)]
    pub payout_email: Option<String>,
    #[serde(default)]
    pub has_reminder: bool,
}

/// Create one event owned by the session user.
///
/// All validation happens before any external call; a free event never
/// sends pricing fields, a paid one requires both.
async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventRecord>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let event_date = parse_event_date(&payload.event_date).ok_or_else(|| {
        AppError::BadRequest("event date must be a calendar date or datetime".to_string())
    })?;

    let pricing = EventPricing::from_form(
        payload.is_paid,
        payload.price,
        payload.payout_email.as_deref(),
    )
    .map_err(AppError::BadRequest)?;

    let record = EventRecord {
        id: None,
        event_name: payload.event_name,
        event_date,
        country: payload.country,
        city: payload.city,
        street: payload.street,
        price: pricing.price(),
        payout_email: pricing.payout_email().map(str::to_string),
        owner_id: session.user_id,
        has_reminder: payload.has_reminder,
    };

    let created = state.db.insert_event(&record).await?;

    tracing::info!(
        user_id = %session.user_id,
        event_name = %created.event_name,
        paid = record.price.is_some(),
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
    pub total: u32,
}

/// List events created by the session user, newest first.
async fn list_events(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<EventsResponse>> {
    let events = state.db.get_events_for_owner(session.user_id).await?;
    let total = events.len() as u32;

    Ok(Json(EventsResponse { events, total }))
}
