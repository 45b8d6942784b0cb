// SPDX-License-Identifier: MIT

//! Account data export assembly.
//!
//! The export has one mandatory section (profile) and two optional ones
//! (created events, participations). The optional fetches are independent:
//! either may fail without aborting the export or suppressing the other.
//! Only the aggregation lives here; the fetches stay in the handler.

use crate::error::AppError;
use crate::models::{EventRecord, ExportDocument, ExportProfile, Participation};
use chrono::NaiveDate;

/// Download name for an export produced on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("meetsync-data-export-{}.json", date.format("%d-%m-%Y"))
}

/// Combine the three sub-fetches into the final document.
///
/// A failed optional fetch degrades to an empty list; the section key is
/// still present so the document shape is stable.
pub fn assemble_export(
    profile: ExportProfile,
    created_meetings: Result<Vec<EventRecord>, AppError>,
    participations: Result<Vec<Participation>, AppError>,
) -> ExportDocument {
    let created_meetings = created_meetings.unwrap_or_else(|e| {
        tracing::warn!(user_id = %profile.id, error = %e, "Events fetch failed, exporting empty section");
        Vec::new()
    });

    let meeting_participations = participations.unwrap_or_else(|e| {
        tracing::warn!(user_id = %profile.id, error = %e, "Participations fetch failed, exporting empty section");
        Vec::new()
    });

    ExportDocument {
        profile,
        created_meetings,
        meeting_participations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountTier, RenewInterval};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn test_profile() -> ExportProfile {
        ExportProfile {
            id: Uuid::new_v4(),
            username: Some("alice".to_string()),
            full_name: None,
            avatar_url: None,
            account_type: AccountTier::Plus,
            renew_type: RenewInterval::Monthly,
            email: Some("alice@example.com".to_string()),
            created_at: Some("2024-06-01T10:00:00Z".to_string()),
            last_sign_in: Some("2025-02-20T08:00:00Z".to_string()),
            user_metadata: serde_json::json!({"username": "alice"}),
        }
    }

    fn test_event(owner_id: Uuid) -> EventRecord {
        EventRecord {
            id: Some(Uuid::new_v4()),
            event_name: "Conf".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            country: "France".to_string(),
            city: "Paris".to_string(),
            street: "1 Rue Test".to_string(),
            price: None,
            payout_email: None,
            owner_id,
            has_reminder: false,
        }
    }

    fn test_participation(user_id: Uuid) -> Participation {
        Participation {
            id: Some(Uuid::new_v4()),
            user_id,
            joined_at: Some("2025-01-15T12:00:00Z".to_string()),
            event: Some(test_event(Uuid::new_v4())),
        }
    }

    #[test]
    fn test_all_sections_succeed() {
        let profile = test_profile();
        let owner = profile.id;

        let doc = assemble_export(
            profile,
            Ok(vec![test_event(owner)]),
            Ok(vec![test_participation(owner)]),
        );

        assert_eq!(doc.created_meetings.len(), 1);
        assert_eq!(doc.meeting_participations.len(), 1);
    }

    #[test]
    fn test_events_failure_keeps_participations() {
        let profile = test_profile();
        let user = profile.id;

        let doc = assemble_export(
            profile,
            Err(AppError::Database("boom".to_string())),
            Ok(vec![test_participation(user)]),
        );

        assert!(doc.created_meetings.is_empty());
        assert_eq!(doc.meeting_participations.len(), 1);
    }

    #[test]
    fn test_participations_failure_keeps_events() {
        let profile = test_profile();
        let owner = profile.id;

        let doc = assemble_export(
            profile,
            Ok(vec![test_event(owner)]),
            Err(AppError::Database("boom".to_string())),
        );

        assert_eq!(doc.created_meetings.len(), 1);
        assert!(doc.meeting_participations.is_empty());
    }

    #[test]
    fn test_document_shape_is_stable_under_total_failure() {
        let doc = assemble_export(
            test_profile(),
            Err(AppError::Database("a".to_string())),
            Err(AppError::Database("b".to_string())),
        );

        // Still a syntactically valid JSON document with all three keys
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("profile").is_some());
        assert_eq!(json["created_meetings"], serde_json::json!([]));
        assert_eq!(json["meeting_participations"], serde_json::json!([]));
    }

    #[test]
    fn test_export_filename_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(export_filename(date), "meetsync-data-export-09-03-2025.json");
    }
}
