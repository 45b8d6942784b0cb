//! Profile row stored by the external service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account plan tier. Gates optional features client-side only; the
/// external service does not enforce these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    #[default]
    Basic,
    Plus,
    Pro,
    Admin,
}

impl AccountTier {
    /// Automatic reminders are a Plus-and-above feature.
    pub fn allows_reminders(self) -> bool {
        matches!(self, AccountTier::Plus | AccountTier::Pro | AccountTier::Admin)
    }

    /// Custom email is a Pro-and-above feature.
    pub fn allows_custom_email(self) -> bool {
        matches!(self, AccountTier::Pro | AccountTier::Admin)
    }
}

/// Subscription renewal interval, stored as a small integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RenewInterval {
    #[default]
    None,
    Monthly,
    Annual,
}

impl TryFrom<u8> for RenewInterval {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RenewInterval::None),
            1 => Ok(RenewInterval::Monthly),
            2 => Ok(RenewInterval::Annual),
            other => Err(format!("invalid renew interval: {}", other)),
        }
    }
}

impl From<RenewInterval> for u8 {
    fn from(value: RenewInterval) -> u8 {
        match value {
            RenewInterval::None => 0,
            RenewInterval::Monthly => 1,
            RenewInterval::Annual => 2,
        }
    }
}

/// User profile row in the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Identity service user ID (also the row key)
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    /// Public URL of the current avatar blob
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub account_type: AccountTier,
    #[serde(default)]
    pub renew_type: RenewInterval,
    /// When the profile row was created
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_gating() {
        assert!(!AccountTier::Basic.allows_reminders());
        assert!(AccountTier::Plus.allows_reminders());
        assert!(!AccountTier::Plus.allows_custom_email());
        assert!(AccountTier::Pro.allows_custom_email());
        assert!(AccountTier::Admin.allows_reminders());
    }

    #[test]
    fn test_renew_interval_round_trip() {
        let json = serde_json::to_string(&RenewInterval::Annual).unwrap();
        assert_eq!(json, "2");
        let parsed: RenewInterval = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, RenewInterval::Monthly);
        assert!(serde_json::from_str::<RenewInterval>("7").is_err());
    }

    #[test]
    fn test_tier_wire_names() {
        let parsed: AccountTier = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(parsed, AccountTier::Pro);
    }
}
