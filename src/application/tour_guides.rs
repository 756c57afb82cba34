use std::sync::Arc;

use thiserror::Error;

use crate::application::repos::{RepoError, TourGuidesRepo};
use crate::domain::entities::TourGuideRecord;

#[derive(Debug, Error)]
pub enum TourGuideServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct TourGuideService {
    reader: Arc<dyn TourGuidesRepo>,
}

impl TourGuideService {
    pub fn new(reader: Arc<dyn TourGuidesRepo>) -> Self {
        Self { reader }
    }

    pub async fn list(&self) -> Result<Vec<TourGuideRecord>, TourGuideServiceError> {
        self.reader
            .list_tour_guides()
            .await
            .map_err(TourGuideServiceError::from)
    }
}
