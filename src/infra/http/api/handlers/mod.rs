//! API handlers organized by resource type.
//!
//! Error conversions shared by the resource modules live here.

mod blogs;
mod comments;
mod health;
mod seed;
mod tour_guides;

pub use blogs::*;
pub use comments::*;
pub use health::*;
pub use seed::*;
pub use tour_guides::*;

use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::application::blogs::BlogServiceError;
use crate::application::comments::CommentServiceError;
use crate::application::repos::RepoError;
use crate::application::seed::SeedError;
use crate::application::tour_guides::TourGuideServiceError;

use super::error::{ApiError, codes};

const INVALID_BODY: &str = "Invalid request body";
const INVALID_QUERY: &str = "Invalid query string";

pub(crate) fn rejection_to_api(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(INVALID_BODY, Some(rejection.body_text()))
}

pub(crate) fn query_rejection_to_api(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(INVALID_QUERY, Some(rejection.body_text()))
}

/// Every store fault is reported as a 500 carrying the route's generic message.
pub(crate) fn repo_to_api(err: RepoError, message: &'static str) -> ApiError {
    let code = match &err {
        RepoError::Duplicate { .. } => codes::DUPLICATE,
        RepoError::Integrity { .. } => codes::INTEGRITY,
        RepoError::Timeout => codes::DB_TIMEOUT,
        RepoError::Persistence(_) | RepoError::NotFound | RepoError::InvalidInput { .. } => {
            codes::REPO
        }
    };
    ApiError::internal(code, message, err.to_string())
}

pub(crate) fn blog_to_api(err: BlogServiceError, message: &'static str) -> ApiError {
    match err {
        BlogServiceError::NotFound => ApiError::not_found("Blog not found"),
        BlogServiceError::Invalid(violation) => ApiError::invalid_input(violation.to_string()),
        BlogServiceError::Repo(repo) => repo_to_api(repo, message),
    }
}

pub(crate) fn comment_to_api(err: CommentServiceError, message: &'static str) -> ApiError {
    match err {
        CommentServiceError::MissingBlogSlug => ApiError::invalid_input(err.to_string()),
        CommentServiceError::Invalid(violation) => ApiError::invalid_input(violation.to_string()),
        CommentServiceError::Repo(repo) => repo_to_api(repo, message),
    }
}

pub(crate) fn tour_guide_to_api(err: TourGuideServiceError, message: &'static str) -> ApiError {
    match err {
        TourGuideServiceError::Repo(repo) => repo_to_api(repo, message),
    }
}

/// Seeding failures are all server-side: fixtures are not caller input.
pub(crate) fn seed_to_api(err: SeedError, message: &'static str) -> ApiError {
    match err {
        SeedError::Repo(repo) => repo_to_api(repo, message),
        other => ApiError::internal(codes::SEED, message, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::domain::error::CommentViolation;

    #[test]
    fn validation_messages_pass_through() {
        let err = comment_to_api(
            CommentServiceError::Invalid(CommentViolation::AuthorTooShort),
            "Failed to create comment",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Author name is required and must be at least 2 characters"
        );
    }

    #[test]
    fn store_faults_use_the_route_message() {
        let err = blog_to_api(
            BlogServiceError::Repo(RepoError::Timeout),
            "Failed to fetch blog",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to fetch blog");
    }

    #[test]
    fn missing_blog_is_not_found() {
        let err = blog_to_api(BlogServiceError::NotFound, "Failed to fetch blog");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Blog not found");
    }
}
