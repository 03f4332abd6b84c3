use super::{Draft, Entity, Reviewable};
use crate::{
    constants::BOOKINGS_COLLECTION,
    validation::{RequiredFields, Validation},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        })
    }
}

/// A trip request submitted from the public search form.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingDraft {
    pub destination: String,
    pub date: String,
    pub travelers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl Draft for BookingDraft {
    const OPTIONAL_FIELDS: &'static [&'static str] = &[
        "customerName",
        "customerEmail",
        "customerPhone",
        "specialRequests",
    ];

    fn validate(&self) -> Validation {
        RequiredFields::new()
            .text("destination", &self.destination)
            .text("date", &self.date)
            .check(
                self.travelers >= 1,
                "travelers",
                "At least one traveler is required.",
            )
            .finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub details: BookingDraft,
    #[serde(default)]
    pub status: BookingStatus,
    pub timestamp: i64,
}

impl Entity for Booking {
    const COLLECTION: &'static str = BOOKINGS_COLLECTION;
    const LABEL: &'static str = "booking";
    type Draft = BookingDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.timestamp
    }

    fn from_draft(id: String, created_at: i64, draft: BookingDraft) -> Self {
        Booking {
            id,
            details: draft,
            status: BookingStatus::Pending,
            timestamp: created_at,
        }
    }

    fn to_draft(&self) -> BookingDraft {
        self.details.clone()
    }
}

impl Reviewable for Booking {
    type Status = BookingStatus;

    fn status(&self) -> BookingStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_flat_with_camel_case_keys() {
        let booking = Booking::from_draft(
            "-Nabc".to_string(),
            42,
            BookingDraft {
                destination: "Dubai".into(),
                date: "2025-01-10".into(),
                travelers: 2,
                customer_name: Some("Aisha".into()),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "-Nabc",
                "destination": "Dubai",
                "date": "2025-01-10",
                "travelers": 2,
                "customerName": "Aisha",
                "status": "pending",
                "timestamp": 42
            })
        );
    }

    #[test]
    fn zero_travelers_is_rejected() {
        let draft = BookingDraft {
            destination: "Dubai".into(),
            date: "2025-01-10".into(),
            travelers: 0,
            ..Default::default()
        };
        assert_eq!(draft.validate().fields(), vec!["travelers"]);
    }
}
