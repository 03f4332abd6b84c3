//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for `nisa-server`.
//! Public pages read through feeds with sample fallbacks; admin routes drive
//! the same form controllers the admin panel uses.

// Sub-modules for different handler categories.
pub mod admin_handlers;
pub mod auth_handlers;
pub mod general;
pub mod image_handlers;
pub mod public;
pub mod search;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use admin_handlers::*;
pub use auth_handlers::*;
pub use general::*;
pub use image_handlers::*;
pub use public::*;
pub use search::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use nisa::{
    entities::{Booking, Entity, Offer, Package, TravelMoment, UmrahApplication},
    EntityRepository, Repositories,
};
use serde_json::Value;

/// A shared helper function to wrap a successful result in the standard `ApiResponse`
/// format, optionally including debug information if requested.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

/// Wraps a result with no debug information.
pub(crate) fn plain_response<T>(result: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        debug: None,
        result,
    })
}

/// Entity kinds served over HTTP, each tied to its repository.
pub trait ResourceKind: Entity {
    fn repository(repos: &Repositories) -> &EntityRepository<Self>;
}

impl ResourceKind for Package {
    fn repository(repos: &Repositories) -> &EntityRepository<Self> {
        &repos.packages
    }
}

impl ResourceKind for Offer {
    fn repository(repos: &Repositories) -> &EntityRepository<Self> {
        &repos.offers
    }
}

impl ResourceKind for TravelMoment {
    fn repository(repos: &Repositories) -> &EntityRepository<Self> {
        &repos.travel_moments
    }
}

impl ResourceKind for Booking {
    fn repository(repos: &Repositories) -> &EntityRepository<Self> {
        &repos.bookings
    }
}

impl ResourceKind for UmrahApplication {
    fn repository(repos: &Repositories) -> &EntityRepository<Self> {
        &repos.umrah_applications
    }
}
