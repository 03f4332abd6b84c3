//! # Nisa Travel Content
//!
//! The data layer of a travel agency site: typed repositories over a realtime
//! JSON document store, an image upload gateway, admin form controllers, public
//! feeds with sample fallbacks, and a generative trip search.

pub mod admin;
pub mod constants;
pub mod display;
pub mod entities;
pub mod errors;
pub mod highlights;
pub mod ids;
pub mod prompts;
pub mod providers;
pub mod repository;
pub mod samples;
pub mod search;
pub mod validation;

pub use admin::{FormController, Notice, StatusReview};
pub use display::{FeedSource, PublicContent, PublicFeed};
pub use errors::{AiError, StoreError, UploadError};
pub use repository::{EntityRepository, Repositories};
pub use search::{SearchParams, SearchResult, TripSearch};
pub use validation::Validation;
