//! In-process store implementing every repository trait.
//!
//! Records keep insertion order inside their vectors; that position is the
//! tie-breaker behind `created_at`, matching the `seq` column in Postgres.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{
    BlogsRepo, BlogsWriteRepo, CommentsRepo, CommentsWriteRepo, CreateCommentParams,
    HealthRepo, RepoError, SeedDataset, SeedRepo, SeedSummary, TourGuidesRepo,
};
use crate::domain::blogs::BlogPatch;
use crate::domain::entities::{BlogRecord, CommentRecord, TourGuideRecord};

const BLOG_SLUG_CONSTRAINT: &str = "blogs_slug_key";

#[derive(Debug, Default)]
struct MemoryState {
    blogs: Vec<BlogRecord>,
    comments: Vec<CommentRecord>,
    tour_guides: Vec<TourGuideRecord>,
}

#[derive(Clone, Default)]
pub struct MemoryRepositories {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; later insertions win ties.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    let mut indexed: Vec<(usize, &T)> = items.iter().enumerate().collect();
    indexed.sort_by(|(left_index, left), (right_index, right)| {
        created_at(right)
            .cmp(&created_at(left))
            .then(right_index.cmp(left_index))
    });
    indexed.into_iter().map(|(_, item)| item.clone()).collect()
}

fn comment_record(params: CreateCommentParams) -> CommentRecord {
    CommentRecord {
        id: Uuid::new_v4(),
        blog_slug: params.blog_slug,
        author: params.author,
        email: params.email,
        content: params.content,
        rating: params.rating,
        date: params.date,
        avatar: params.avatar,
        created_at: params.created_at,
        updated_at: params.created_at,
    }
}

#[async_trait]
impl BlogsRepo for MemoryRepositories {
    async fn list_blogs(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.blogs, |blog| blog.created_at))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError> {
        let state = self.state.read().await;
        Ok(state.blogs.iter().find(|blog| blog.slug == slug).cloned())
    }
}

#[async_trait]
impl BlogsWriteRepo for MemoryRepositories {
    async fn update_blog(
        &self,
        slug: &str,
        patch: &BlogPatch,
    ) -> Result<Option<BlogRecord>, RepoError> {
        let mut state = self.state.write().await;
        let Some(blog) = state.blogs.iter_mut().find(|blog| blog.slug == slug) else {
            return Ok(None);
        };
        patch.apply(blog, OffsetDateTime::now_utc());
        Ok(Some(blog.clone()))
    }
}

#[async_trait]
impl CommentsRepo for MemoryRepositories {
    async fn list_for_blog(&self, blog_slug: &str) -> Result<Vec<CommentRecord>, RepoError> {
        let state = self.state.read().await;
        let matching: Vec<CommentRecord> = state
            .comments
            .iter()
            .filter(|comment| comment.blog_slug == blog_slug)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |comment| comment.created_at))
    }
}

#[async_trait]
impl CommentsWriteRepo for MemoryRepositories {
    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError> {
        let record = comment_record(params);
        self.state.write().await.comments.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TourGuidesRepo for MemoryRepositories {
    async fn list_tour_guides(&self) -> Result<Vec<TourGuideRecord>, RepoError> {
        Ok(self.state.read().await.tour_guides.clone())
    }
}

#[async_trait]
impl SeedRepo for MemoryRepositories {
    async fn replace_all(&self, dataset: SeedDataset) -> Result<SeedSummary, RepoError> {
        let SeedDataset {
            blogs,
            tour_guides,
            comments,
        } = dataset;

        let mut seen = HashSet::new();
        if blogs.iter().any(|blog| !seen.insert(blog.slug.as_str())) {
            return Err(RepoError::Duplicate {
                constraint: BLOG_SLUG_CONSTRAINT.to_string(),
            });
        }

        let now = OffsetDateTime::now_utc();
        let next = MemoryState {
            blogs: blogs
                .into_iter()
                .map(|params| BlogRecord {
                    id: Uuid::new_v4(),
                    slug: params.slug,
                    title: params.title,
                    excerpt: params.excerpt,
                    content: params.content,
                    author: params.author,
                    date: params.date,
                    read_time: params.read_time,
                    hero_image: params.hero_image,
                    category: params.category,
                    quote: params.quote,
                    created_at: params.created_at,
                    updated_at: params.created_at,
                })
                .collect(),
            tour_guides: tour_guides
                .into_iter()
                .map(|params| TourGuideRecord {
                    id: Uuid::new_v4(),
                    name: params.name,
                    location: params.location,
                    rating: params.rating,
                    reviews: params.reviews,
                    avatar: params.avatar,
                    specialty: params.specialty,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
            comments: comments.into_iter().map(comment_record).collect(),
        };

        let summary = SeedSummary {
            blogs: next.blogs.len(),
            tour_guides: next.tour_guides.len(),
            comments: next.comments.len(),
        };
        *self.state.write().await = next;
        Ok(summary)
    }
}

#[async_trait]
impl HealthRepo for MemoryRepositories {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
