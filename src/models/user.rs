//! Identity records owned by the external auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User record as returned by the auth admin API.
///
/// The lifecycle of this record is owned entirely by the identity service;
/// we only read it and occasionally patch `user_metadata.avatar_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserRecord {
    pub id: Uuid,
    pub email: Option<String>,
    /// When the account was created (identity service timestamp)
    pub created_at: Option<String>,
    pub last_sign_in_at: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
}

impl AuthUserRecord {
    /// Authentication provider (`email`, `google`, ...), if recorded.
    pub fn provider(&self) -> Option<&str> {
        self.app_metadata.get("provider").and_then(|v| v.as_str())
    }

    /// Current avatar URL from the metadata object.
    pub fn avatar_url(&self) -> Option<&str> {
        self.user_metadata.get("avatar_url").and_then(|v| v.as_str())
    }

    /// Display name: username first, then full name.
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .get("username")
            .or_else(|| self.user_metadata.get("full_name"))
            .and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(metadata: serde_json::Value, app: serde_json::Value) -> AuthUserRecord {
        AuthUserRecord {
            id: Uuid::nil(),
            email: Some("user@example.com".to_string()),
            created_at: None,
            last_sign_in_at: None,
            user_metadata: metadata,
            app_metadata: app,
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        let user = record(
            serde_json::json!({"username": "alice", "full_name": "Alice B"}),
            serde_json::json!({}),
        );
        assert_eq!(user.display_name(), Some("alice"));

        let user = record(serde_json::json!({"full_name": "Alice B"}), serde_json::json!({}));
        assert_eq!(user.display_name(), Some("Alice B"));
    }

    #[test]
    fn test_provider_read() {
        let user = record(serde_json::json!({}), serde_json::json!({"provider": "google"}));
        assert_eq!(user.provider(), Some("google"));
    }
}
