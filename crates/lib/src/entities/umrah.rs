use super::{Draft, Entity, Reviewable};
use crate::{
    constants::UMRAH_APPLICATIONS_COLLECTION,
    validation::{RequiredFields, Validation},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UmrahApplicationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub passport_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_travelers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl Draft for UmrahApplicationDraft {
    const OPTIONAL_FIELDS: &'static [&'static str] = &[
        "passportExpiry",
        "travelDate",
        "numberOfTravelers",
        "purpose",
        "additionalNotes",
    ];

    fn validate(&self) -> Validation {
        RequiredFields::new()
            .text("name", &self.name)
            .text("email", &self.email)
            .text("phone", &self.phone)
            .text("passportNumber", &self.passport_number)
            .finish()
    }
}

/// A visa application submitted by the public and reviewed by an admin.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UmrahApplication {
    pub id: String,
    #[serde(flatten)]
    pub applicant: UmrahApplicationDraft,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub timestamp: i64,
}

impl Entity for UmrahApplication {
    const COLLECTION: &'static str = UMRAH_APPLICATIONS_COLLECTION;
    const LABEL: &'static str = "application";
    type Draft = UmrahApplicationDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.timestamp
    }

    fn from_draft(id: String, created_at: i64, draft: UmrahApplicationDraft) -> Self {
        UmrahApplication {
            id,
            applicant: draft,
            status: ApplicationStatus::Pending,
            timestamp: created_at,
        }
    }

    fn to_draft(&self) -> UmrahApplicationDraft {
        self.applicant.clone()
    }
}

impl Reviewable for UmrahApplication {
    type Status = ApplicationStatus;

    fn status(&self) -> ApplicationStatus {
        self.status
    }
}
