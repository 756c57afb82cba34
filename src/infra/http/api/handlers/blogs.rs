//! Blog handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use trailpost_api_types::{Blog, UpdateBlogRequest};

use super::{blog_to_api, rejection_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::update_blog_command;
use crate::infra::http::api::state::ApiState;

pub async fn list_blogs(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let blogs = state
        .blogs
        .list()
        .await
        .map_err(|err| blog_to_api(err, "Failed to fetch blogs"))?;

    Ok(Json(blogs.into_iter().map(Blog::from).collect::<Vec<_>>()))
}

pub async fn get_blog(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let blog = state
        .blogs
        .get_by_slug(&slug)
        .await
        .map_err(|err| blog_to_api(err, "Failed to fetch blog"))?;

    Ok(Json(Blog::from(blog)))
}

pub async fn update_blog(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(rejection_to_api)?;

    let blog = state
        .blogs
        .update_by_slug(update_blog_command(slug, request))
        .await
        .map_err(|err| blog_to_api(err, "Failed to update blog"))?;

    Ok(Json(Blog::from(blog)))
}
