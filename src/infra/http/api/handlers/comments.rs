//! Comment handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use trailpost_api_types::{Comment, CreateCommentRequest};

use super::{comment_to_api, query_rejection_to_api, rejection_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::comment_submission;
use crate::infra::http::api::state::ApiState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentListQuery {
    pub blog_slug: Option<String>,
}

pub async fn list_comments(
    State(state): State<ApiState>,
    query: Result<Query<CommentListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(query_rejection_to_api)?;
    let comments = state
        .comments
        .list_for_blog(query.blog_slug.as_deref())
        .await
        .map_err(|err| comment_to_api(err, "Failed to fetch comments"))?;

    Ok(Json(
        comments.into_iter().map(Comment::from).collect::<Vec<_>>(),
    ))
}

pub async fn create_comment(
    State(state): State<ApiState>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(rejection_to_api)?;

    let comment = state
        .comments
        .create(comment_submission(request))
        .await
        .map_err(|err| comment_to_api(err, "Failed to create comment"))?;

    Ok((StatusCode::CREATED, Json(Comment::from(comment))))
}
