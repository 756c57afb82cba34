use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CreateTourGuideParams, RepoError, TourGuidesRepo},
    domain::entities::TourGuideRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct TourGuideRow {
    id: Uuid,
    name: String,
    location: String,
    rating: f64,
    reviews: i32,
    avatar: String,
    specialty: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<TourGuideRow> for TourGuideRecord {
    fn from(row: TourGuideRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            rating: row.rating,
            reviews: row.reviews,
            avatar: row.avatar,
            specialty: row.specialty,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(super) async fn insert_tour_guide<'e, E>(
    executor: E,
    params: CreateTourGuideParams,
    now: OffsetDateTime,
) -> Result<(), RepoError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO tour_guides (
            id, name, location, rating, reviews, avatar, specialty, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.name)
    .bind(params.location)
    .bind(params.rating)
    .bind(params.reviews)
    .bind(params.avatar)
    .bind(params.specialty)
    .bind(now)
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(())
}

#[async_trait]
impl TourGuidesRepo for PostgresRepositories {
    async fn list_tour_guides(&self) -> Result<Vec<TourGuideRecord>, RepoError> {
        let rows = sqlx::query_as::<_, TourGuideRow>(
            r#"
            SELECT id, name, location, rating, reviews, avatar, specialty, created_at, updated_at
            FROM tour_guides
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(rows.into_iter().map(TourGuideRecord::from).collect())
    }
}
