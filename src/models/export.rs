//! Shape of the account data export document.

use crate::models::{AccountTier, AuthUserRecord, EventRecord, Participation, Profile, RenewInterval};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile section of the export: the profile row enriched with fields
/// only the identity record knows (email, sign-in times, raw metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportProfile {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub account_type: AccountTier,
    pub renew_type: RenewInterval,
    pub email: Option<String>,
    /// Account creation time from the identity service
    pub created_at: Option<String>,
    pub last_sign_in: Option<String>,
    pub user_metadata: serde_json::Value,
}

impl ExportProfile {
    pub fn new(profile: Profile, user: &AuthUserRecord) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            account_type: profile.account_type,
            renew_type: profile.renew_type,
            email: user.email.clone(),
            created_at: user.created_at.clone(),
            last_sign_in: user.last_sign_in_at.clone(),
            user_metadata: user.user_metadata.clone(),
        }
    }
}

/// The complete downloadable snapshot of a user's data.
///
/// `profile` is mandatory; the two lists degrade to empty when their
/// fetches fail, independently of each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub profile: ExportProfile,
    pub created_meetings: Vec<EventRecord>,
    pub meeting_participations: Vec<Participation>,
}
