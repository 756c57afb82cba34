//! Conversions between wire types and domain records.

use trailpost_api_types::{
    Author, AuthorPatch as AuthorPatchBody, Blog, Comment, CreateCommentRequest, TourGuide,
    UpdateBlogRequest,
};

use crate::application::blogs::UpdateBlogCommand;
use crate::domain::blogs::{AuthorPatch, BlogPatch};
use crate::domain::comments::CommentSubmission;
use crate::domain::entities::{BlogRecord, CommentRecord, TourGuideRecord};

impl From<BlogRecord> for Blog {
    fn from(record: BlogRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug,
            title: record.title,
            excerpt: record.excerpt,
            content: record.content,
            author: Author {
                name: record.author.name,
                avatar: record.author.avatar,
                bio: record.author.bio,
            },
            date: record.date,
            read_time: record.read_time,
            hero_image: record.hero_image,
            category: record.category,
            quote: record.quote,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            blog_slug: record.blog_slug,
            author: record.author,
            email: record.email,
            content: record.content,
            rating: record.rating,
            date: record.date,
            avatar: record.avatar,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<TourGuideRecord> for TourGuide {
    fn from(record: TourGuideRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            location: record.location,
            rating: record.rating,
            reviews: record.reviews,
            avatar: record.avatar,
            specialty: record.specialty,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub fn comment_submission(request: CreateCommentRequest) -> CommentSubmission {
    CommentSubmission {
        blog_slug: request.blog_slug,
        author: request.author,
        content: request.content,
        email: request.email,
        avatar: request.avatar,
        rating: request.rating,
    }
}

pub fn update_blog_command(slug: String, request: UpdateBlogRequest) -> UpdateBlogCommand {
    let author = request
        .author
        .map(|AuthorPatchBody { name, avatar, bio }| AuthorPatch { name, avatar, bio })
        .unwrap_or_default();

    UpdateBlogCommand {
        slug,
        body_slug: request.slug,
        patch: BlogPatch {
            title: request.title,
            excerpt: request.excerpt,
            content: request.content,
            author,
            date: request.date,
            read_time: request.read_time,
            hero_image: request.hero_image,
            category: request.category,
            quote: request.quote,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_author_patch_keeps_every_author_field() {
        let command = update_blog_command(
            "kyoto".to_string(),
            UpdateBlogRequest {
                title: Some("Kyoto".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(command.patch.author, AuthorPatch::default());
        assert_eq!(command.patch.title.as_deref(), Some("Kyoto"));
        assert_eq!(command.body_slug, None);
    }
}
