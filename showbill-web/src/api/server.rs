//! HTTP server setup and routing

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::api::handlers;

/// Shared application context passed to all handlers
///
/// The pool is the per-request connection scope: reads borrow a connection
/// per statement, mutations open one transaction each.
#[derive(Clone)]
pub struct AppContext {
    pub db_pool: SqlitePool,
}

/// Build the application router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Venues
        .route("/venues", get(handlers::list_venues))
        .route("/venues/search", post(handlers::search_venues))
        .route(
            "/venues/create",
            get(handlers::create_venue_form).post(handlers::create_venue),
        )
        .route("/venues/:venue_id", get(handlers::show_venue))
        .route(
            "/venues/:venue_id/edit",
            get(handlers::edit_venue_form).post(handlers::edit_venue),
        )
        .route("/venues/:venue_id/delete", post(handlers::delete_venue))
        // Artists
        .route("/artists", get(handlers::list_artists))
        .route("/artists/search", post(handlers::search_artists))
        .route(
            "/artists/create",
            get(handlers::create_artist_form).post(handlers::create_artist),
        )
        .route("/artists/:artist_id", get(handlers::show_artist))
        .route(
            "/artists/:artist_id/edit",
            get(handlers::edit_artist_form).post(handlers::edit_artist),
        )
        .route("/artists/:artist_id/delete", post(handlers::delete_artist))
        // Shows
        .route("/shows", get(handlers::list_shows))
        .route(
            "/shows/create",
            get(handlers::create_show_form).post(handlers::create_show),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
