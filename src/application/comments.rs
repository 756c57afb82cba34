use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::application::repos::{CommentsRepo, CommentsWriteRepo, CreateCommentParams, RepoError};
use crate::domain::comments::{CommentSubmission, avatar_url, display_date};
use crate::domain::entities::CommentRecord;
use crate::domain::error::CommentViolation;

#[derive(Debug, Error)]
pub enum CommentServiceError {
    #[error("Blog slug is required")]
    MissingBlogSlug,
    #[error(transparent)]
    Invalid(#[from] CommentViolation),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct CommentService {
    reader: Arc<dyn CommentsRepo>,
    writer: Arc<dyn CommentsWriteRepo>,
}

impl CommentService {
    pub fn new(reader: Arc<dyn CommentsRepo>, writer: Arc<dyn CommentsWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list_for_blog(
        &self,
        blog_slug: Option<&str>,
    ) -> Result<Vec<CommentRecord>, CommentServiceError> {
        let blog_slug = blog_slug
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .ok_or(CommentServiceError::MissingBlogSlug)?;

        self.reader
            .list_for_blog(blog_slug)
            .await
            .map_err(CommentServiceError::from)
    }

    pub async fn create(
        &self,
        submission: CommentSubmission,
    ) -> Result<CommentRecord, CommentServiceError> {
        let valid = match submission.validate() {
            Ok(valid) => valid,
            Err(violation) => {
                counter!("trailpost_comments_rejected_total").increment(1);
                debug!(
                    target = "trailpost::comments",
                    reason = %violation,
                    "comment rejected"
                );
                return Err(violation.into());
            }
        };

        let now = OffsetDateTime::now_utc();
        let avatar = valid
            .avatar
            .unwrap_or_else(|| avatar_url(&valid.author));

        let comment = self
            .writer
            .create_comment(CreateCommentParams {
                blog_slug: valid.blog_slug,
                author: valid.author,
                email: valid.email,
                content: valid.content,
                rating: valid.rating,
                date: display_date(now),
                avatar,
                created_at: now,
            })
            .await?;

        counter!("trailpost_comments_created_total").increment(1);
        info!(
            target = "trailpost::comments",
            blog_slug = %comment.blog_slug,
            rating = comment.rating,
            "comment created"
        );

        Ok(comment)
    }
}
