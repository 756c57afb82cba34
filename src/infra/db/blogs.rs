use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{BlogsRepo, BlogsWriteRepo, RepoError},
    domain::blogs::BlogPatch,
    domain::entities::{AuthorRecord, BlogRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    slug: String,
    title: String,
    excerpt: String,
    content: Vec<String>,
    author_name: String,
    author_avatar: String,
    author_bio: String,
    display_date: String,
    read_time: String,
    hero_image: String,
    category: String,
    quote: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BlogRow> for BlogRecord {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            author: AuthorRecord {
                name: row.author_name,
                avatar: row.author_avatar,
                bio: row.author_bio,
            },
            date: row.display_date,
            read_time: row.read_time,
            hero_image: row.hero_image,
            category: row.category,
            quote: row.quote,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BlogsRepo for PostgresRepositories {
    async fn list_blogs(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, slug, title, excerpt, content, author_name, author_avatar, author_bio,
                   display_date, read_time, hero_image, category, quote, created_at, updated_at
            FROM blogs
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(rows.into_iter().map(BlogRecord::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, slug, title, excerpt, content, author_name, author_avatar, author_bio,
                   display_date, read_time, hero_image, category, quote, created_at, updated_at
            FROM blogs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(row.map(BlogRecord::from))
    }
}

#[async_trait]
impl BlogsWriteRepo for PostgresRepositories {
    async fn update_blog(
        &self,
        slug: &str,
        patch: &BlogPatch,
    ) -> Result<Option<BlogRecord>, RepoError> {
        let now = OffsetDateTime::now_utc();

        // Each column keeps its stored value when the bound replacement is NULL.
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs SET
                title = COALESCE($2, title),
                excerpt = COALESCE($3, excerpt),
                content = COALESCE($4, content),
                author_name = COALESCE($5, author_name),
                author_avatar = COALESCE($6, author_avatar),
                author_bio = COALESCE($7, author_bio),
                display_date = COALESCE($8, display_date),
                read_time = COALESCE($9, read_time),
                hero_image = COALESCE($10, hero_image),
                category = COALESCE($11, category),
                quote = COALESCE($12, quote),
                updated_at = $13
            WHERE slug = $1
            RETURNING id, slug, title, excerpt, content, author_name, author_avatar, author_bio,
                      display_date, read_time, hero_image, category, quote, created_at, updated_at
            "#,
        )
        .bind(slug)
        .bind(patch.title.as_deref())
        .bind(patch.excerpt.as_deref())
        .bind(patch.content.clone())
        .bind(patch.author.name.as_deref())
        .bind(patch.author.avatar.as_deref())
        .bind(patch.author.bio.as_deref())
        .bind(patch.date.as_deref())
        .bind(patch.read_time.as_deref())
        .bind(patch.hero_image.as_deref())
        .bind(patch.category.as_deref())
        .bind(patch.quote.as_deref())
        .bind(now)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BlogRecord::from))
    }
}
