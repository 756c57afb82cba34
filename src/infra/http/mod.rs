pub mod api;
mod middleware;

pub use api::{AdminState, ApiState};

use axum::{Router, middleware as axum_middleware};

use self::middleware::{log_responses, set_request_context};

/// Router for the public listener.
pub fn build_router(state: ApiState) -> Router {
    api::build_api_router(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

/// Router for the admin listener.
pub fn build_admin_router(state: AdminState) -> Router {
    api::build_admin_api_router(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
