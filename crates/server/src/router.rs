use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use nisa::entities::{Booking, Offer, Package, TravelMoment, UmrahApplication};
use tower_http::trace::TraceLayer;

/// Upper bound for a single image upload body.
const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Public pages
        .route("/packages", get(handlers::public_feed_handler::<Package>))
        .route("/offers", get(handlers::public_feed_handler::<Offer>))
        .route(
            "/travel-moments",
            get(handlers::public_feed_handler::<TravelMoment>),
        )
        .route("/bookings", post(handlers::create_booking_handler))
        .route(
            "/umrah-applications",
            post(handlers::create_umrah_application_handler),
        )
        .route("/search", post(handlers::trip_search_handler))
        // Admin
        .route("/admin/login", post(handlers::login_handler))
        .route(
            "/admin/packages",
            get(handlers::list_records_handler::<Package>)
                .post(handlers::create_record_handler::<Package>),
        )
        .route(
            "/admin/packages/{id}",
            put(handlers::update_record_handler::<Package>)
                .delete(handlers::delete_record_handler::<Package>),
        )
        .route(
            "/admin/offers",
            get(handlers::list_records_handler::<Offer>)
                .post(handlers::create_record_handler::<Offer>),
        )
        .route(
            "/admin/offers/{id}",
            put(handlers::update_record_handler::<Offer>)
                .delete(handlers::delete_record_handler::<Offer>),
        )
        .route(
            "/admin/travel-moments",
            get(handlers::list_records_handler::<TravelMoment>)
                .post(handlers::create_record_handler::<TravelMoment>),
        )
        .route(
            "/admin/travel-moments/{id}",
            put(handlers::update_record_handler::<TravelMoment>)
                .delete(handlers::delete_record_handler::<TravelMoment>),
        )
        .route(
            "/admin/travel-moments/{id}/visibility",
            patch(handlers::moment_visibility_handler),
        )
        .route(
            "/admin/bookings",
            get(handlers::list_reviews_handler::<Booking>),
        )
        .route(
            "/admin/bookings/{id}/status",
            patch(handlers::update_status_handler::<Booking>),
        )
        .route(
            "/admin/umrah-applications",
            get(handlers::list_reviews_handler::<UmrahApplication>),
        )
        .route(
            "/admin/umrah-applications/{id}/status",
            patch(handlers::update_status_handler::<UmrahApplication>),
        )
        .route(
            "/admin/images",
            post(handlers::upload_image_handler).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/admin/seed", post(handlers::seed_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
