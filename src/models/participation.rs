//! Event participation rows, read only during data export.

use crate::models::EventRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in `event_participants` joining a user to an event they did not
/// create. The export query embeds the related event under `meeting`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    #[serde(default)]
    pub joined_at: Option<String>,
    /// Joined event row (`meeting:events(*)` in the read)
    #[serde(rename = "meeting", default)]
    pub event: Option<EventRecord>,
}
