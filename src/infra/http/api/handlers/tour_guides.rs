use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use trailpost_api_types::TourGuide;

use super::tour_guide_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn list_tour_guides(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let guides = state
        .tour_guides
        .list()
        .await
        .map_err(|err| tour_guide_to_api(err, "Failed to fetch tour guides"))?;

    Ok(Json(guides.into_iter().map(TourGuide::from).collect::<Vec<_>>()))
}
