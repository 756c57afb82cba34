use std::sync::Arc;

use crate::application::blogs::BlogService;
use crate::application::comments::CommentService;
use crate::application::repos::HealthRepo;
use crate::application::seed::SeedService;
use crate::application::tour_guides::TourGuideService;
use crate::infra::store::Repositories;

/// State behind the public listener.
#[derive(Clone)]
pub struct ApiState {
    pub blogs: Arc<BlogService>,
    pub comments: Arc<CommentService>,
    pub tour_guides: Arc<TourGuideService>,
    pub health: Arc<dyn HealthRepo>,
}

impl ApiState {
    pub fn from_repositories(repositories: &Repositories) -> Self {
        Self {
            blogs: Arc::new(BlogService::new(
                repositories.blogs.clone(),
                repositories.blogs_write.clone(),
            )),
            comments: Arc::new(CommentService::new(
                repositories.comments.clone(),
                repositories.comments_write.clone(),
            )),
            tour_guides: Arc::new(TourGuideService::new(repositories.tour_guides.clone())),
            health: repositories.health.clone(),
        }
    }
}

/// State behind the admin listener.
#[derive(Clone)]
pub struct AdminState {
    pub seed: Arc<SeedService>,
    pub health: Arc<dyn HealthRepo>,
}

impl AdminState {
    pub fn from_repositories(repositories: &Repositories) -> Self {
        Self {
            seed: Arc::new(SeedService::new(repositories.seed.clone())),
            health: repositories.health.clone(),
        }
    }
}
