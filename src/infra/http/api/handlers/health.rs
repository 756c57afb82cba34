use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::ErrorReport;
use crate::application::repos::{HealthRepo, RepoError};
use crate::infra::http::api::state::{AdminState, ApiState};

pub(crate) fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

async fn check(health: &Arc<dyn HealthRepo>) -> Response {
    db_health_response(health.health_check().await)
}

pub async fn public_health(State(state): State<ApiState>) -> Response {
    check(&state.health).await
}

pub async fn admin_health(State(state): State<AdminState>) -> Response {
    check(&state.health).await
}
