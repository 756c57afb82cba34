use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CommentsRepo, CommentsWriteRepo, CreateCommentParams, RepoError},
    domain::entities::CommentRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    blog_slug: String,
    author: String,
    email: Option<String>,
    content: String,
    rating: i16,
    display_date: String,
    avatar: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<CommentRow> for CommentRecord {
    type Error = RepoError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating).map_err(|_| RepoError::Integrity {
            message: format!("comment {} has out-of-range rating {}", row.id, row.rating),
        })?;

        Ok(Self {
            id: row.id,
            blog_slug: row.blog_slug,
            author: row.author,
            email: row.email,
            content: row.content,
            rating,
            date: row.display_date,
            avatar: row.avatar,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert one comment inside the caller's transaction or pool.
pub(super) async fn insert_comment<'e, E>(
    executor: E,
    params: CreateCommentParams,
) -> Result<CommentRecord, RepoError>
where
    E: sqlx::PgExecutor<'e>,
{
    let CreateCommentParams {
        blog_slug,
        author,
        email,
        content,
        rating,
        date,
        avatar,
        created_at,
    } = params;

    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO comments (
            id, blog_slug, author, email, content, rating, display_date, avatar,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, blog_slug, author, email, content, rating, display_date, avatar,
                  created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(blog_slug)
    .bind(author)
    .bind(email)
    .bind(content)
    .bind(i16::from(rating))
    .bind(date)
    .bind(avatar)
    .bind(created_at)
    .fetch_one(executor)
    .await
    .map_err(map_sqlx_error)?;

    CommentRecord::try_from(row)
}

#[async_trait]
impl CommentsRepo for PostgresRepositories {
    async fn list_for_blog(&self, blog_slug: &str) -> Result<Vec<CommentRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, blog_slug, author, email, content, rating, display_date, avatar,
                   created_at, updated_at
            FROM comments
            WHERE blog_slug = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(blog_slug)
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        rows.into_iter().map(CommentRecord::try_from).collect()
    }
}

#[async_trait]
impl CommentsWriteRepo for PostgresRepositories {
    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError> {
        insert_comment(self.pool(), params).await
    }
}
