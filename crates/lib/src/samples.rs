//! # Sample Data
//!
//! Hardcoded records used in three places: as the public fallback when a live
//! fetch fails, as the trip search fallback, and as seed content for an empty
//! database.

use crate::{
    entities::{Draft, Entity, Offer, OfferDraft, Package, PackageDraft, TravelMoment, TravelMomentDraft},
    errors::StoreError,
    repository::Repositories,
    search::SearchResult,
};
use tracing::info;

const UNSPLASH_PARAMS: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}{UNSPLASH_PARAMS}")
}

/// Records a public page substitutes when the live collection cannot be read.
pub trait FallbackSamples: Entity {
    fn fallback_samples() -> Vec<Self>;
}

fn package(
    title: &str,
    photo: &str,
    duration: &str,
    highlights: [&str; 4],
    rating: f64,
    price: &str,
    location: &str,
) -> PackageDraft {
    PackageDraft {
        title: title.to_string(),
        image: unsplash(photo),
        duration: duration.to_string(),
        highlights: highlights.into_iter().collect(),
        rating,
        price: price.to_string(),
        location: location.to_string(),
        description: None,
        group_size: None,
    }
}

impl FallbackSamples for Package {
    fn fallback_samples() -> Vec<Self> {
        let drafts = [
            package(
                "Bali Paradise",
                "photo-1537953773345-d172ccf13cf1",
                "7 Days",
                ["All-inclusive", "Beach Resort", "Cultural Tours", "Private Guide"],
                4.9,
                "$1,299",
                "Bali, Indonesia",
            ),
            package(
                "Swiss Alps Adventure",
                "photo-1501854140801-50d01698950b",
                "5 Days",
                ["Mountain Views", "Hiking Trails", "Local Cuisine", "Cable Car Rides"],
                4.8,
                "$1,899",
                "Swiss Alps, Switzerland",
            ),
            package(
                "Tokyo Experience",
                "photo-1540959733332-eab4deabeeaf",
                "6 Days",
                ["City Tours", "Traditional Temples", "Modern Culture", "Food Experience"],
                4.7,
                "$1,599",
                "Tokyo, Japan",
            ),
            package(
                "Safari Adventure",
                "photo-1469041797191-50ace28483c3",
                "8 Days",
                ["Wildlife Safari", "Luxury Camps", "Game Drives", "Photography Tours"],
                4.9,
                "$2,299",
                "Maasai Mara, Kenya",
            ),
        ];
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Package::from_draft((i + 1).to_string(), 0, draft))
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn offer(
    title: &str,
    photo: &str,
    description: &str,
    original_price: f64,
    discounted_price: f64,
    duration: &str,
    group_size: &str,
    valid_until: &str,
    highlights: [&str; 4],
) -> OfferDraft {
    let mut draft = OfferDraft {
        title: title.to_string(),
        image: unsplash(photo),
        description: description.to_string(),
        original_price,
        discounted_price,
        discount: 0,
        duration: duration.to_string(),
        group_size: group_size.to_string(),
        valid_until: valid_until.to_string(),
        highlights: highlights.into_iter().collect(),
    };
    draft.normalize();
    draft
}

impl FallbackSamples for Offer {
    fn fallback_samples() -> Vec<Self> {
        let drafts = [
            offer(
                "Dubai City Break",
                "photo-1512453979798-5ea266f8880c",
                "Experience luxury and adventure in the heart of Dubai",
                1999.0,
                1499.0,
                "5 Days",
                "2-4 People",
                "2024-05-30",
                ["5-star hotel", "Desert Safari", "Burj Khalifa Visit", "Dhow Cruise"],
            ),
            offer(
                "Abu Dhabi Explorer",
                "photo-1511700581673-4c78fa0cbec0",
                "Discover the cultural heritage and modern marvels of Abu Dhabi",
                1799.0,
                1399.0,
                "4 Days",
                "2-6 People",
                "2024-06-15",
                ["Sheikh Zayed Mosque", "Ferrari World", "Louvre Abu Dhabi", "Desert Adventure"],
            ),
            offer(
                "Ras Al Khaimah Getaway",
                "photo-1528127269322-539801943592",
                "Relax and unwind in the northernmost emirate",
                1599.0,
                1199.0,
                "3 Days",
                "2-4 People",
                "2024-06-30",
                ["Beach Resort", "Mountain Adventure", "Water Sports", "Desert Camp"],
            ),
        ];
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Offer::from_draft((i + 1).to_string(), 0, draft))
            .collect()
    }
}

impl FallbackSamples for TravelMoment {
    fn fallback_samples() -> Vec<Self> {
        let photos = [
            ("photo-1472396961693-142e6e269027", "Mountain landscape with deer", "Swiss Alps"),
            ("photo-1482938289607-e9573fc25ebb", "River between mountains", "Norway Fjords"),
            ("photo-1500375592092-40eb2168fd21", "Ocean waves at beach", "Maldives"),
            ("photo-1469474968028-56623f02e42e", "Mountain landscape with sunlight", "Himalayas"),
            ("photo-1518877593221-1f28583780b4", "Humpback whale jumping", "Iceland"),
            ("photo-1465379944081-7f47de8d74ac", "Cattle in forest", "Amazon Rainforest"),
            ("photo-1469041797191-50ace28483c3", "Camels in desert", "Sahara Desert"),
            ("photo-1433086966358-54859d0ed716", "Mountain landscape", "Patagonia"),
        ];
        photos
            .into_iter()
            .enumerate()
            .map(|(i, (photo, alt, location))| {
                TravelMoment::from_draft(
                    (i + 1).to_string(),
                    0,
                    TravelMomentDraft {
                        image: unsplash(photo),
                        alt: alt.to_string(),
                        location: location.to_string(),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }
}

/// The three packages returned when trip search cannot produce results.
/// Prices are per traveler.
pub fn sample_search_results() -> Vec<SearchResult> {
    let result = |id: &str,
                  title: &str,
                  description: &str,
                  price: f64,
                  duration: &str,
                  highlights: [&str; 4],
                  photo: &str,
                  rating: f64,
                  available_seats: u32| SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        duration: duration.to_string(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
        image: unsplash(photo),
        rating,
        available_seats,
    };
    vec![
        result(
            "dubai-city-1",
            "Dubai City Explorer",
            "Experience the perfect blend of modern luxury and traditional culture in Dubai.",
            1499.0,
            "5 Days",
            ["Burj Khalifa Visit", "Desert Safari", "Dubai Mall", "Dhow Cruise"],
            "photo-1512453979798-5ea266f8880c",
            4.8,
            12,
        ),
        result(
            "dubai-luxury-1",
            "Dubai Luxury Escape",
            "Indulge in a luxurious Dubai experience with premium accommodations and exclusive activities.",
            2499.0,
            "7 Days",
            ["Palm Jumeirah Tour", "Helicopter Ride", "Desert Resort Stay", "Private Beach Access"],
            "photo-1533395427226-788cee25cc7b",
            4.9,
            8,
        ),
        result(
            "dubai-adventure-1",
            "Dubai Adventure Package",
            "Get your adrenaline pumping with exciting activities in and around Dubai.",
            1799.0,
            "6 Days",
            ["Skydiving", "Desert Quad Biking", "Water Park", "Zip Line"],
            "photo-1584551246679-0daf3d275d0f",
            4.7,
            15,
        ),
    ]
}

/// Packages written by [`seed_sample_data`].
pub fn seed_packages() -> Vec<PackageDraft> {
    vec![
        PackageDraft {
            description: Some("Experience luxury and adventure in the heart of Dubai".into()),
            group_size: Some("2-4 People".into()),
            ..package(
                "Dubai Luxury Experience",
                "photo-1512453979798-5ea266f8880c",
                "5 Days",
                ["5-star hotel", "Desert Safari", "Burj Khalifa Visit", "Dhow Cruise"],
                4.9,
                "$1,299",
                "Dubai, UAE",
            )
        },
        PackageDraft {
            description: Some("Discover the cultural heritage and modern marvels of Abu Dhabi".into()),
            group_size: Some("2-6 People".into()),
            ..package(
                "Abu Dhabi Cultural Tour",
                "photo-1511700581673-4c78fa0cbec0",
                "4 Days",
                ["Sheikh Zayed Mosque", "Ferrari World", "Louvre Abu Dhabi", "Desert Adventure"],
                4.8,
                "$1,199",
                "Abu Dhabi, UAE",
            )
        },
    ]
}

/// Offers written by [`seed_sample_data`].
pub fn seed_offers() -> Vec<OfferDraft> {
    Offer::fallback_samples()
        .into_iter()
        .take(2)
        .map(|offer| OfferDraft {
            valid_until: "2024-12-31".to_string(),
            ..offer.details
        })
        .collect()
}

/// Counts of records written by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedSummary {
    pub packages: usize,
    pub offers: usize,
}

/// Writes the sample packages and offers through the repositories.
pub async fn seed_sample_data(repos: &Repositories) -> Result<SeedSummary, StoreError> {
    info!("Adding sample data");
    let mut summary = SeedSummary::default();
    for draft in seed_packages() {
        let title = draft.title.clone();
        repos.packages.add(draft).await?;
        info!("Added package: {title}");
        summary.packages += 1;
    }
    for draft in seed_offers() {
        let title = draft.title.clone();
        repos.offers.add(draft).await?;
        info!("Added offer: {title}");
        summary.offers += 1;
    }
    info!(?summary, "Sample data added");
    Ok(summary)
}
