//! Admin seeding handler

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use trailpost_api_types::MessageBody;

use super::seed_to_api;
use crate::application::fixtures::Fixtures;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::AdminState;

const SEED_FAILED: &str = "Failed to seed database";

/// Replace every collection with the bundled fixtures.
pub async fn seed_database(
    State(state): State<AdminState>,
) -> Result<impl IntoResponse, ApiError> {
    let fixtures = Fixtures::bundled().map_err(|err| seed_to_api(err.into(), SEED_FAILED))?;

    state
        .seed
        .seed(fixtures)
        .await
        .map_err(|err| seed_to_api(err, SEED_FAILED))?;

    Ok(Json(MessageBody {
        message: "Database seeded successfully".to_string(),
    }))
}
