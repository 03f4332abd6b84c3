//! Collection paths and endpoint defaults shared across the crate.

pub const BOOKINGS_COLLECTION: &str = "bookings";
pub const PACKAGES_COLLECTION: &str = "packages";
pub const OFFERS_COLLECTION: &str = "offers";
pub const UMRAH_APPLICATIONS_COLLECTION: &str = "umrahApplications";
pub const TRAVEL_MOMENTS_COLLECTION: &str = "travelMoments";

pub const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Builds the `generateContent` endpoint for a Gemini model.
pub fn gemini_api_url(model_name: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent")
}

/// Number of results a trip search is expected to return.
pub const SEARCH_RESULT_COUNT: usize = 3;
