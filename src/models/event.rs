//! Event row and the paid/free pricing rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

/// Event row in the `events` table.
///
/// Wire names follow the external schema: the street column is `rue` and
/// the payout email is `paypal_email`. Optional pricing fields are omitted
/// from the insert payload entirely when the event is free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Row ID assigned by the external service (absent on insert)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub event_name: String,
    /// Calendar date only; any time component was stripped before insert
    pub event_date: NaiveDate,
    pub country: String,
    pub city: String,
    #[serde(rename = "rue")]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "paypal_email", default, skip_serializing_if = "Option::is_none")]
    pub payout_email: Option<String>,
    pub owner_id: Uuid,
    pub has_reminder: bool,
}

/// Pricing rule: price and payout email exist iff the event is paid.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPricing {
    Free,
    Paid { price: f64, payout_email: String },
}

impl EventPricing {
    /// Resolve the pricing variant from raw form fields.
    ///
    /// A free event ignores leftover price/email values (the original form
    /// clears them when the paid box is unticked). A paid event requires a
    /// positive price and a valid payout email.
    pub fn from_form(
        is_paid: bool,
        price: Option<f64>,
        payout_email: Option<&str>,
    ) -> Result<Self, String> {
        if !is_paid {
            return Ok(EventPricing::Free);
        }

        let price = price.ok_or_else(|| "price is required for paid events".to_string())?;
        if !price.is_finite() || price <= 0.0 {
            return Err("price must be a positive number".to_string());
        }

        let payout_email = payout_email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| "payout email is required for paid events".to_string())?;
        if !payout_email.validate_email() {
            return Err("payout email is not a valid email address".to_string());
        }

        Ok(EventPricing::Paid {
            price,
            payout_email: payout_email.to_string(),
        })
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            EventPricing::Free => None,
            EventPricing::Paid { price, .. } => Some(*price),
        }
    }

    pub fn payout_email(&self) -> Option<&str> {
        match self {
            EventPricing::Free => None,
            EventPricing::Paid { payout_email, .. } => Some(payout_email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_event_needs_no_pricing() {
        let pricing = EventPricing::from_form(false, None, None).unwrap();
        assert_eq!(pricing, EventPricing::Free);
        assert_eq!(pricing.price(), None);
        assert_eq!(pricing.payout_email(), None);
    }

    #[test]
    fn test_free_event_discards_leftover_values() {
        // The form clears these when the paid box is unticked; stale values
        // must never reach the insert payload.
        let pricing = EventPricing::from_form(false, Some(10.0), Some("a@b.fr")).unwrap();
        assert_eq!(pricing, EventPricing::Free);
    }

    #[test]
    fn test_paid_event_requires_price() {
        let err = EventPricing::from_form(true, None, Some("seller@example.com")).unwrap_err();
        assert!(err.contains("price"));
    }

    #[test]
    fn test_paid_event_requires_positive_price() {
        assert!(EventPricing::from_form(true, Some(0.0), Some("seller@example.com")).is_err());
        assert!(EventPricing::from_form(true, Some(-5.0), Some("seller@example.com")).is_err());
        assert!(EventPricing::from_form(true, Some(f64::NAN), Some("seller@example.com")).is_err());
    }

    #[test]
    fn test_paid_event_requires_valid_email() {
        assert!(EventPricing::from_form(true, Some(12.5), None).is_err());
        assert!(EventPricing::from_form(true, Some(12.5), Some("  ")).is_err());
        assert!(EventPricing::from_form(true, Some(12.5), Some("not-an-email")).is_err());

        let pricing = EventPricing::from_form(true, Some(12.5), Some("seller@example.com")).unwrap();
        assert_eq!(
            pricing,
            EventPricing::Paid {
                price: 12.5,
                payout_email: "seller@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_free_insert_payload_omits_pricing_fields() {
        let record = EventRecord {
            id: None,
            event_name: "Conf".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            country: "France".to_string(),
            city: "Paris".to_string(),
            street: "1 Rue Test".to_string(),
            price: None,
            payout_email: None,
            owner_id: Uuid::nil(),
            has_reminder: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("price").is_none());
        assert!(json.get("paypal_email").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["rue"], "1 Rue Test");
        assert_eq!(json["event_date"], "2025-03-01");
        assert_eq!(json["has_reminder"], false);
    }
}
