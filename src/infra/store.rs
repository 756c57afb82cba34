//! Repository wiring shared by the server and the seed command.

use std::sync::Arc;

use tracing::info;

use crate::application::repos::{
    BlogsRepo, BlogsWriteRepo, CommentsRepo, CommentsWriteRepo, HealthRepo, SeedRepo,
    TourGuidesRepo,
};
use crate::config::DatabaseSettings;
use crate::infra::db::PostgresRepositories;
use crate::infra::error::InfraError;
use crate::infra::memory::MemoryRepositories;

const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Clone)]
pub struct Repositories {
    pub blogs: Arc<dyn BlogsRepo>,
    pub blogs_write: Arc<dyn BlogsWriteRepo>,
    pub comments: Arc<dyn CommentsRepo>,
    pub comments_write: Arc<dyn CommentsWriteRepo>,
    pub tour_guides: Arc<dyn TourGuidesRepo>,
    pub seed: Arc<dyn SeedRepo>,
    pub health: Arc<dyn HealthRepo>,
    in_memory: bool,
}

impl Repositories {
    fn from_backend<B>(backend: Arc<B>, in_memory: bool) -> Self
    where
        B: BlogsRepo
            + BlogsWriteRepo
            + CommentsRepo
            + CommentsWriteRepo
            + TourGuidesRepo
            + SeedRepo
            + HealthRepo
            + 'static,
    {
        Self {
            blogs: backend.clone(),
            blogs_write: backend.clone(),
            comments: backend.clone(),
            comments_write: backend.clone(),
            tour_guides: backend.clone(),
            seed: backend.clone(),
            health: backend,
            in_memory,
        }
    }

    /// Fresh, empty in-process store.
    pub fn memory() -> Self {
        Self::from_backend(Arc::new(MemoryRepositories::new()), true)
    }

    pub fn postgres(repositories: PostgresRepositories) -> Self {
        Self::from_backend(Arc::new(repositories), false)
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Open the store named by `settings.url`; `memory://` selects the in-process store,
    /// anything else is treated as a Postgres URL and migrated before use.
    pub async fn open(settings: &DatabaseSettings) -> Result<Self, InfraError> {
        let url = settings
            .url
            .as_deref()
            .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

        if url.starts_with(MEMORY_URL_SCHEME) {
            info!(target = "trailpost::store", "using in-memory store");
            return Ok(Self::memory());
        }

        let pool = PostgresRepositories::connect(url, settings.max_connections.get())
            .await
            .map_err(|err| InfraError::database(err.to_string()))?;
        PostgresRepositories::run_migrations(&pool)
            .await
            .map_err(|err| InfraError::database(err.to_string()))?;

        info!(
            target = "trailpost::store",
            max_connections = settings.max_connections.get(),
            "connected to postgres"
        );
        Ok(Self::postgres(PostgresRepositories::new(pool)))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn settings(url: Option<&str>) -> DatabaseSettings {
        DatabaseSettings {
            url: url.map(str::to_string),
            max_connections: NonZeroU32::new(1).expect("non-zero"),
        }
    }

    #[tokio::test]
    async fn memory_url_opens_in_process_store() {
        let repositories = Repositories::open(&settings(Some("memory://")))
            .await
            .expect("memory store");
        assert!(repositories.is_in_memory());
        assert!(repositories.health.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn missing_url_is_a_configuration_error() {
        let result = Repositories::open(&settings(None)).await;
        assert!(matches!(result, Err(InfraError::Configuration { .. })));
    }
}
