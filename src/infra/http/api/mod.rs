pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::{AdminState, ApiState};

use axum::{
    Router,
    routing::{get, post},
};

/// Public JSON API under `/api`.
pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/blogs", get(handlers::list_blogs))
        .route(
            "/api/blogs/{slug}",
            get(handlers::get_blog).put(handlers::update_blog),
        )
        .route("/api/tour-guides", get(handlers::list_tour_guides))
        .route(
            "/api/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/_health/db", get(handlers::public_health))
        .with_state(state)
}

pub fn build_admin_api_router(state: AdminState) -> Router {
    Router::new()
        .route("/api/seed", post(handlers::seed_database))
        .route("/_health/db", get(handlers::admin_health))
        .with_state(state)
}
