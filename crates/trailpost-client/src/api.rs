//! Cached facade over [`ApiClient`].
//!
//! Reads go through the query cache; mutations go straight to the server
//! and invalidate the tags they touch once they succeed.

use std::sync::Arc;

use trailpost_api_types::{Blog, Comment, CreateCommentRequest, TourGuide, UpdateBlogRequest};

use crate::cache::{Mutation, QueryCache, QueryKey};
use crate::client::{ApiClient, ClientError};

/// Errors are shared between callers that joined the same fetch.
pub type ApiResult<T> = Result<T, Arc<ClientError>>;

#[derive(Debug, Clone)]
enum QueryValue {
    Blogs(Vec<Blog>),
    Blog(Blog),
    TourGuides(Vec<TourGuide>),
    Comments(Vec<Comment>),
}

#[derive(Clone)]
pub struct BlogApi {
    client: ApiClient,
    cache: QueryCache<QueryKey, QueryValue, Arc<ClientError>>,
}

impl BlogApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// True when the entry for `key` would be served without a request.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.cache.is_fresh(key)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.cache.is_stale(key)
    }

    pub async fn blogs(&self) -> ApiResult<Vec<Blog>> {
        let client = self.client.clone();
        let key = QueryKey::Blogs;
        let value = self
            .cache
            .query(key.clone(), move || async move {
                client.list_blogs().await.map(QueryValue::Blogs).map_err(Arc::new)
            })
            .await?;
        match value {
            QueryValue::Blogs(blogs) => Ok(blogs),
            _ => Err(mismatch(&key)),
        }
    }

    pub async fn blog_by_slug(&self, slug: &str) -> ApiResult<Blog> {
        let client = self.client.clone();
        let key = QueryKey::BlogBySlug(slug.to_string());
        let owned = slug.to_string();
        let value = self
            .cache
            .query(key.clone(), move || async move {
                client.get_blog(&owned).await.map(QueryValue::Blog).map_err(Arc::new)
            })
            .await?;
        match value {
            QueryValue::Blog(blog) => Ok(blog),
            _ => Err(mismatch(&key)),
        }
    }

    pub async fn tour_guides(&self) -> ApiResult<Vec<TourGuide>> {
        let client = self.client.clone();
        let key = QueryKey::TourGuides;
        let value = self
            .cache
            .query(key.clone(), move || async move {
                client
                    .list_tour_guides()
                    .await
                    .map(QueryValue::TourGuides)
                    .map_err(Arc::new)
            })
            .await?;
        match value {
            QueryValue::TourGuides(guides) => Ok(guides),
            _ => Err(mismatch(&key)),
        }
    }

    pub async fn comments_by_blog(&self, blog_slug: &str) -> ApiResult<Vec<Comment>> {
        let client = self.client.clone();
        let key = QueryKey::CommentsByBlog(blog_slug.to_string());
        let owned = blog_slug.to_string();
        let value = self
            .cache
            .query(key.clone(), move || async move {
                client
                    .list_comments(&owned)
                    .await
                    .map(QueryValue::Comments)
                    .map_err(Arc::new)
            })
            .await?;
        match value {
            QueryValue::Comments(comments) => Ok(comments),
            _ => Err(mismatch(&key)),
        }
    }

    /// Post a comment; invalidates the comment list of the blog it landed on.
    pub async fn add_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        self.cache
            .mutate(
                async { self.client.create_comment(request).await.map_err(Arc::new) },
                |comment: &Comment| {
                    Mutation::AddComment {
                        blog_slug: comment.blog_slug.clone(),
                    }
                    .invalidates()
                },
            )
            .await
    }

    /// Update a blog; invalidates that blog and the blog list.
    pub async fn update_blog(&self, slug: &str, request: &UpdateBlogRequest) -> ApiResult<Blog> {
        self.cache
            .mutate(
                async { self.client.update_blog(slug, request).await.map_err(Arc::new) },
                |_: &Blog| {
                    Mutation::UpdateBlog {
                        slug: slug.to_string(),
                    }
                    .invalidates()
                },
            )
            .await
    }
}

fn mismatch(key: &QueryKey) -> Arc<ClientError> {
    Arc::new(ClientError::CacheMismatch { query: key.name() })
}
