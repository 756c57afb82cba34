//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::blogs::BlogPatch;
use crate::domain::entities::{AuthorRecord, BlogRecord, CommentRecord, TourGuideRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateBlogParams {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: Vec<String>,
    pub author: AuthorRecord,
    pub date: String,
    pub read_time: String,
    pub hero_image: String,
    pub category: String,
    pub quote: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub blog_slug: String,
    pub author: String,
    pub email: Option<String>,
    pub content: String,
    pub rating: u8,
    pub date: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateTourGuideParams {
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub reviews: i32,
    pub avatar: String,
    pub specialty: String,
}

/// Complete replacement content for every collection.
#[derive(Debug, Clone, Default)]
pub struct SeedDataset {
    pub blogs: Vec<CreateBlogParams>,
    pub tour_guides: Vec<CreateTourGuideParams>,
    pub comments: Vec<CreateCommentParams>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub blogs: usize,
    pub tour_guides: usize,
    pub comments: usize,
}

#[async_trait]
pub trait BlogsRepo: Send + Sync {
    /// All blogs, newest first.
    async fn list_blogs(&self) -> Result<Vec<BlogRecord>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError>;
}

#[async_trait]
pub trait BlogsWriteRepo: Send + Sync {
    /// Merge `patch` into the blog addressed by `slug`; `None` when no such blog exists.
    async fn update_blog(
        &self,
        slug: &str,
        patch: &BlogPatch,
    ) -> Result<Option<BlogRecord>, RepoError>;
}

#[async_trait]
pub trait CommentsRepo: Send + Sync {
    /// Comments attached to `blog_slug`, newest first.
    async fn list_for_blog(&self, blog_slug: &str) -> Result<Vec<CommentRecord>, RepoError>;
}

#[async_trait]
pub trait CommentsWriteRepo: Send + Sync {
    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError>;
}

#[async_trait]
pub trait TourGuidesRepo: Send + Sync {
    /// All guides in insertion order.
    async fn list_tour_guides(&self) -> Result<Vec<TourGuideRecord>, RepoError>;
}

#[async_trait]
pub trait SeedRepo: Send + Sync {
    /// Atomically clear every collection and insert `dataset`.
    async fn replace_all(&self, dataset: SeedDataset) -> Result<SeedSummary, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
