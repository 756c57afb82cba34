use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{BlogsRepo, BlogsWriteRepo, RepoError};
use crate::domain::blogs::{BlogPatch, ensure_slug_unchanged};
use crate::domain::entities::BlogRecord;
use crate::domain::error::BlogViolation;

#[derive(Debug, Error)]
pub enum BlogServiceError {
    #[error("blog not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] BlogViolation),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateBlogCommand {
    pub slug: String,
    /// Slug carried in the request body, if any.
    pub body_slug: Option<String>,
    pub patch: BlogPatch,
}

#[derive(Clone)]
pub struct BlogService {
    reader: Arc<dyn BlogsRepo>,
    writer: Arc<dyn BlogsWriteRepo>,
}

impl BlogService {
    pub fn new(reader: Arc<dyn BlogsRepo>, writer: Arc<dyn BlogsWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list(&self) -> Result<Vec<BlogRecord>, BlogServiceError> {
        self.reader.list_blogs().await.map_err(BlogServiceError::from)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogRecord, BlogServiceError> {
        self.reader
            .find_by_slug(slug)
            .await?
            .ok_or(BlogServiceError::NotFound)
    }

    pub async fn update_by_slug(
        &self,
        command: UpdateBlogCommand,
    ) -> Result<BlogRecord, BlogServiceError> {
        let UpdateBlogCommand {
            slug,
            body_slug,
            patch,
        } = command;

        ensure_slug_unchanged(&slug, body_slug.as_deref())?;
        let patch = patch.normalize()?;

        let updated = self
            .writer
            .update_blog(&slug, &patch)
            .await?
            .ok_or(BlogServiceError::NotFound)?;

        counter!("trailpost_blog_updates_total").increment(1);
        info!(
            target = "trailpost::blogs",
            slug = %updated.slug,
            empty_patch = patch.is_empty(),
            "blog updated"
        );

        Ok(updated)
    }
}
