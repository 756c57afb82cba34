use thiserror::Error;

/// Reasons a reader comment is refused before it reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommentViolation {
    #[error("Invalid or missing blogSlug")]
    MissingBlogSlug,
    #[error("Author name is required and must be at least 2 characters")]
    AuthorTooShort,
    #[error("Content is required and must be at least 3 characters")]
    ContentTooShort,
}

/// Reasons a blog update is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlogViolation {
    #[error("Blog slug cannot be changed")]
    SlugChanged,
    #[error("Blog title must not be empty")]
    EmptyTitle,
    #[error("Blog content must contain at least one paragraph")]
    EmptyContent,
}
