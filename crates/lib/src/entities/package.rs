use super::{Deletable, Draft, Entity, HasHighlights, HasImage};
use crate::{
    constants::PACKAGES_COLLECTION,
    highlights::HighlightList,
    validation::{RequiredFields, Validation},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageDraft {
    pub title: String,
    pub image: String,
    pub duration: String,
    pub highlights: HighlightList,
    pub rating: f64,
    /// Display price, e.g. `"$1,299"`.
    pub price: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_size: Option<String>,
}

impl Draft for PackageDraft {
    const OPTIONAL_FIELDS: &'static [&'static str] = &["description", "groupSize"];

    fn validate(&self) -> Validation {
        RequiredFields::new()
            .text("title", &self.title)
            .text("image", &self.image)
            .text("duration", &self.duration)
            .text("price", &self.price)
            .text("location", &self.location)
            .check(
                (0.0..=5.0).contains(&self.rating),
                "rating",
                "rating must be between 0 and 5.",
            )
            .finish()
    }
}

impl HasImage for PackageDraft {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}

impl HasHighlights for PackageDraft {
    fn highlights_mut(&mut self) -> &mut HighlightList {
        &mut self.highlights
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(flatten)]
    pub details: PackageDraft,
    pub created_at: i64,
}

impl Entity for Package {
    const COLLECTION: &'static str = PACKAGES_COLLECTION;
    const LABEL: &'static str = "package";
    type Draft = PackageDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_draft(id: String, created_at: i64, draft: PackageDraft) -> Self {
        Package {
            id,
            details: draft,
            created_at,
        }
    }

    fn to_draft(&self) -> PackageDraft {
        self.details.clone()
    }
}

impl Deletable for Package {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_highlights_deserialize_as_empty() {
        // The realtime database drops empty arrays on write.
        let package: Package = serde_json::from_value(json!({
            "id": "p1",
            "title": "Dubai Luxury Experience",
            "image": "https://img/1.jpg",
            "duration": "5 Days",
            "rating": 4.9,
            "price": "$1,299",
            "location": "Dubai, UAE",
            "createdAt": 10
        }))
        .unwrap();
        assert!(package.details.highlights.is_empty());
        assert_eq!(package.details.group_size, None);
    }

    #[test]
    fn optional_fields_match_the_serialized_keys() {
        let full = PackageDraft {
            description: Some("d".into()),
            group_size: Some("2-8".into()),
            ..Default::default()
        };
        let with = serde_json::to_value(&full).unwrap();
        let without = serde_json::to_value(PackageDraft::default()).unwrap();
        for key in PackageDraft::OPTIONAL_FIELDS {
            assert!(with.get(key).is_some(), "{key}");
            assert!(without.get(key).is_none(), "{key}");
        }
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let draft = PackageDraft {
            title: "t".into(),
            image: "i".into(),
            duration: "d".into(),
            price: "p".into(),
            location: "l".into(),
            rating: 7.5,
            ..Default::default()
        };
        assert_eq!(draft.validate().fields(), vec!["rating"]);
    }
}
