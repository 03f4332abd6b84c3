use super::{Deletable, Draft, Entity, HasImage};
use crate::{
    constants::TRAVEL_MOMENTS_COLLECTION,
    validation::{RequiredFields, Validation},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelMomentDraft {
    pub image: String,
    pub alt: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traveler_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Draft for TravelMomentDraft {
    const OPTIONAL_FIELDS: &'static [&'static str] = &["description", "travelerName", "category"];

    fn validate(&self) -> Validation {
        RequiredFields::new()
            .text("image", &self.image)
            .text("alt", &self.alt)
            .text("location", &self.location)
            .finish()
    }
}

impl HasImage for TravelMomentDraft {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}

/// A traveler photo shown in the public gallery while `is_active` is set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelMoment {
    pub id: String,
    #[serde(flatten)]
    pub details: TravelMomentDraft,
    pub created_at: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A partial update toggling gallery visibility.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MomentVisibility {
    pub is_active: bool,
}

impl Entity for TravelMoment {
    const COLLECTION: &'static str = TRAVEL_MOMENTS_COLLECTION;
    const LABEL: &'static str = "travel moment";
    type Draft = TravelMomentDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_draft(id: String, created_at: i64, draft: TravelMomentDraft) -> Self {
        TravelMoment {
            id,
            details: draft,
            created_at,
            is_active: true,
        }
    }

    fn to_draft(&self) -> TravelMomentDraft {
        self.details.clone()
    }
}

impl Deletable for TravelMoment {}
