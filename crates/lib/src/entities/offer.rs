use super::{Deletable, Draft, Entity, HasHighlights, HasImage};
use crate::{
    constants::OFFERS_COLLECTION,
    highlights::HighlightList,
    validation::{RequiredFields, Validation},
};
use serde::{Deserialize, Serialize};

/// Percentage saved, rounded half-up to a whole number.
///
/// A non-positive original price yields `0`.
pub fn compute_discount(original_price: f64, discounted_price: f64) -> i64 {
    if original_price.is_nan() || original_price <= 0.0 {
        return 0;
    }
    let percent = (original_price - discounted_price) / original_price * 100.0;
    (percent + 0.5).floor() as i64
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OfferDraft {
    pub title: String,
    pub image: String,
    pub description: String,
    pub original_price: f64,
    pub discounted_price: f64,
    /// Derived from the two prices on every submission; any submitted value is overwritten.
    pub discount: i64,
    pub duration: String,
    pub group_size: String,
    pub valid_until: String,
    pub highlights: HighlightList,
}

impl Draft for OfferDraft {
    fn validate(&self) -> Validation {
        RequiredFields::new()
            .text("title", &self.title)
            .text("image", &self.image)
            .text("description", &self.description)
            .text("validUntil", &self.valid_until)
            .finish()
    }

    fn normalize(&mut self) {
        self.discount = compute_discount(self.original_price, self.discounted_price);
    }
}

impl HasImage for OfferDraft {
    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, url: String) {
        self.image = url;
    }
}

impl HasHighlights for OfferDraft {
    fn highlights_mut(&mut self) -> &mut HighlightList {
        &mut self.highlights
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    #[serde(flatten)]
    pub details: OfferDraft,
    pub created_at: i64,
}

impl Entity for Offer {
    const COLLECTION: &'static str = OFFERS_COLLECTION;
    const LABEL: &'static str = "offer";
    type Draft = OfferDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_draft(id: String, created_at: i64, draft: OfferDraft) -> Self {
        Offer {
            id,
            details: draft,
            created_at,
        }
    }

    fn to_draft(&self) -> OfferDraft {
        self.details.clone()
    }
}

impl Deletable for Offer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_matches_sample_offers() {
        assert_eq!(compute_discount(1999.0, 1499.0), 25);
        assert_eq!(compute_discount(1799.0, 1399.0), 22);
        assert_eq!(compute_discount(1599.0, 1199.0), 25);
    }

    #[test]
    fn discount_rounds_half_up() {
        // 12.5% exactly
        assert_eq!(compute_discount(200.0, 175.0), 13);
        // a price increase rounds towards positive infinity too
        assert_eq!(compute_discount(200.0, 205.0), -2);
    }

    #[test]
    fn zero_original_price_yields_no_discount() {
        assert_eq!(compute_discount(0.0, 100.0), 0);
    }

    #[test]
    fn normalize_overwrites_submitted_discount() {
        let mut draft = OfferDraft {
            original_price: 1000.0,
            discounted_price: 750.0,
            discount: 99,
            ..Default::default()
        };
        draft.normalize();
        assert_eq!(draft.discount, 25);
    }
}
