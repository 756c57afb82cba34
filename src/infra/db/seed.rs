use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CreateBlogParams, RepoError, SeedDataset, SeedRepo, SeedSummary};

use super::{
    PostgresRepositories, comments::insert_comment, map_sqlx_error,
    tour_guides::insert_tour_guide,
};

#[async_trait]
impl SeedRepo for PostgresRepositories {
    async fn replace_all(&self, dataset: SeedDataset) -> Result<SeedSummary, RepoError> {
        let SeedDataset {
            blogs,
            tour_guides,
            comments,
        } = dataset;
        let summary = SeedSummary {
            blogs: blogs.len(),
            tour_guides: tour_guides.len(),
            comments: comments.len(),
        };
        let now = OffsetDateTime::now_utc();

        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        for statement in [
            "DELETE FROM comments",
            "DELETE FROM tour_guides",
            "DELETE FROM blogs",
        ] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        for blog in blogs {
            insert_blog(&mut tx, blog).await?;
        }
        for guide in tour_guides {
            insert_tour_guide(&mut *tx, guide, now).await?;
        }
        for comment in comments {
            insert_comment(&mut *tx, comment).await?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(summary)
    }
}

async fn insert_blog(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    params: CreateBlogParams,
) -> Result<(), RepoError> {
    let CreateBlogParams {
        slug,
        title,
        excerpt,
        content,
        author,
        date,
        read_time,
        hero_image,
        category,
        quote,
        created_at,
    } = params;

    sqlx::query(
        r#"
        INSERT INTO blogs (
            id, slug, title, excerpt, content, author_name, author_avatar, author_bio,
            display_date, read_time, hero_image, category, quote, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(title)
    .bind(excerpt)
    .bind(content)
    .bind(author.name)
    .bind(author.avatar)
    .bind(author.bio)
    .bind(date)
    .bind(read_time)
    .bind(hero_image)
    .bind(category)
    .bind(quote)
    .bind(created_at)
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx_error)?;

    Ok(())
}
