use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::application::fixtures::{BlogFixture, CommentFixture, FixtureError, Fixtures};
use crate::application::repos::{
    CreateBlogParams, CreateCommentParams, CreateTourGuideParams, RepoError, SeedDataset, SeedRepo,
    SeedSummary,
};
use crate::domain::blogs::BlogPatch;
use crate::domain::comments::{CommentSubmission, avatar_url, display_date};
use crate::domain::entities::AuthorRecord;
use crate::domain::error::{BlogViolation, CommentViolation};
use crate::domain::slug::is_canonical_slug;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error("fixture blog slug `{0}` is not a canonical slug")]
    InvalidSlug(String),
    #[error("fixture blog `{slug}` is invalid: {violation}")]
    InvalidBlog {
        slug: String,
        violation: BlogViolation,
    },
    #[error("fixture comment #{index} is invalid: {violation}")]
    InvalidComment {
        index: usize,
        violation: CommentViolation,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct SeedService {
    writer: Arc<dyn SeedRepo>,
}

impl SeedService {
    pub fn new(writer: Arc<dyn SeedRepo>) -> Self {
        Self { writer }
    }

    /// Replace every collection with `fixtures`.
    pub async fn seed(&self, fixtures: Fixtures) -> Result<SeedSummary, SeedError> {
        let dataset = build_dataset(fixtures, OffsetDateTime::now_utc())?;
        let summary = self.writer.replace_all(dataset).await?;

        counter!("trailpost_seed_runs_total").increment(1);
        info!(
            target = "trailpost::seed",
            blogs = summary.blogs,
            tour_guides = summary.tour_guides,
            comments = summary.comments,
            "database seeded"
        );

        Ok(summary)
    }
}

/// Turn fixtures into insert parameters.
///
/// Blogs and comments get creation times one second apart counting back from
/// `now`, so newest-first listings follow fixture order.
pub fn build_dataset(fixtures: Fixtures, now: OffsetDateTime) -> Result<SeedDataset, SeedError> {
    let Fixtures {
        blogs,
        tour_guides,
        comments,
    } = fixtures;

    let default_slug = blogs.first().map(|blog| blog.slug.clone());

    let blogs = blogs
        .into_iter()
        .enumerate()
        .map(|(index, blog)| blog_params(blog, staggered(now, index)))
        .collect::<Result<Vec<_>, _>>()?;

    let tour_guides = tour_guides
        .into_iter()
        .map(|guide| CreateTourGuideParams {
            name: guide.name,
            location: guide.location,
            rating: guide.rating,
            reviews: guide.reviews,
            avatar: guide.avatar,
            specialty: guide.specialty,
        })
        .collect();

    let comments = comments
        .into_iter()
        .enumerate()
        .map(|(index, comment)| {
            comment_params(comment, default_slug.as_deref(), staggered(now, index))
                .map_err(|violation| SeedError::InvalidComment { index, violation })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeedDataset {
        blogs,
        tour_guides,
        comments,
    })
}

fn staggered(now: OffsetDateTime, index: usize) -> OffsetDateTime {
    let offset = i64::try_from(index).unwrap_or(i64::MAX);
    now.checked_sub(Duration::seconds(offset)).unwrap_or(now)
}

fn blog_params(
    blog: BlogFixture,
    created_at: OffsetDateTime,
) -> Result<CreateBlogParams, SeedError> {
    if !is_canonical_slug(&blog.slug) {
        return Err(SeedError::InvalidSlug(blog.slug));
    }

    let checked = BlogPatch {
        title: Some(blog.title),
        content: Some(blog.content),
        ..Default::default()
    }
    .normalize()
    .map_err(|violation| SeedError::InvalidBlog {
        slug: blog.slug.clone(),
        violation,
    })?;

    Ok(CreateBlogParams {
        slug: blog.slug,
        title: checked.title.unwrap_or_default(),
        excerpt: blog.excerpt,
        content: checked.content.unwrap_or_default(),
        author: AuthorRecord {
            name: blog.author.name,
            avatar: blog.author.avatar,
            bio: blog.author.bio,
        },
        date: blog.date,
        read_time: blog.read_time,
        hero_image: blog.hero_image,
        category: blog.category,
        quote: blog.quote,
        created_at,
    })
}

fn comment_params(
    comment: CommentFixture,
    default_slug: Option<&str>,
    created_at: OffsetDateTime,
) -> Result<CreateCommentParams, CommentViolation> {
    let blog_slug = comment
        .blog_slug
        .filter(|slug| !slug.trim().is_empty())
        .or_else(|| default_slug.map(str::to_string));
    let date = comment
        .date
        .filter(|date| !date.trim().is_empty())
        .unwrap_or_else(|| display_date(created_at));

    let valid = CommentSubmission {
        blog_slug,
        author: Some(comment.author),
        content: Some(comment.content),
        email: comment.email,
        avatar: comment.avatar,
        rating: comment.rating,
    }
    .validate()?;

    let avatar = valid
        .avatar
        .unwrap_or_else(|| avatar_url(&valid.author));

    Ok(CreateCommentParams {
        blog_slug: valid.blog_slug,
        author: valid.author,
        email: valid.email,
        content: valid.content,
        rating: valid.rating,
        date,
        avatar,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::{AuthorFixture, TourGuideFixture};
    use serde_json::json;
    use time::macros::datetime;

    fn blog(slug: &str) -> BlogFixture {
        BlogFixture {
            slug: slug.to_string(),
            title: format!("About {slug}"),
            excerpt: String::new(),
            content: vec!["Paragraph".to_string()],
            author: AuthorFixture::default(),
            date: String::new(),
            read_time: String::new(),
            hero_image: String::new(),
            category: String::new(),
            quote: String::new(),
        }
    }

    fn comment(blog_slug: Option<&str>) -> CommentFixture {
        CommentFixture {
            blog_slug: blog_slug.map(str::to_string),
            author: "Maya".to_string(),
            email: None,
            content: "Loved the rice terraces".to_string(),
            rating: Some(json!(9)),
            date: None,
            avatar: None,
        }
    }

    #[test]
    fn comments_without_slug_attach_to_first_blog() {
        let now = datetime!(2024-03-07 12:00 UTC);
        let fixtures = Fixtures {
            blogs: vec![blog("bali-gems"), blog("kyoto-walks")],
            tour_guides: vec![TourGuideFixture {
                name: "Wayan".into(),
                location: "Ubud".into(),
                rating: 4.9,
                reviews: 120,
                avatar: String::new(),
                specialty: "Temples".into(),
            }],
            comments: vec![comment(None), comment(Some("kyoto-walks"))],
        };

        let dataset = build_dataset(fixtures, now).expect("dataset");

        assert_eq!(dataset.comments[0].blog_slug, "bali-gems");
        assert_eq!(dataset.comments[1].blog_slug, "kyoto-walks");
        assert_eq!(dataset.comments[0].rating, 5);
        assert_eq!(dataset.comments[0].date, "7 Mar 2024");
        assert!(dataset.comments[0].avatar.starts_with("https://ui-avatars.com/api/"));
        assert_eq!(dataset.tour_guides[0].name, "Wayan");
    }

    #[test]
    fn blog_creation_times_follow_fixture_order() {
        let now = datetime!(2024-03-07 12:00 UTC);
        let fixtures = Fixtures {
            blogs: vec![blog("first"), blog("second")],
            ..Default::default()
        };

        let dataset = build_dataset(fixtures, now).expect("dataset");
        assert!(dataset.blogs[0].created_at > dataset.blogs[1].created_at);
    }

    #[test]
    fn non_canonical_slugs_are_rejected() {
        let fixtures = Fixtures {
            blogs: vec![blog("Not A Slug")],
            ..Default::default()
        };
        let err = build_dataset(fixtures, OffsetDateTime::now_utc()).expect_err("invalid slug");
        assert!(matches!(err, SeedError::InvalidSlug(slug) if slug == "Not A Slug"));
    }

    #[test]
    fn orphan_comments_fail_without_blogs() {
        let fixtures = Fixtures {
            comments: vec![comment(None)],
            ..Default::default()
        };
        let err = build_dataset(fixtures, OffsetDateTime::now_utc()).expect_err("no blog");
        assert!(matches!(
            err,
            SeedError::InvalidComment {
                index: 0,
                violation: CommentViolation::MissingBlogSlug
            }
        ));
    }

    #[test]
    fn bundled_fixtures_build() {
        let dataset =
            build_dataset(Fixtures::bundled().expect("bundled"), OffsetDateTime::now_utc())
                .expect("dataset");
        let first = dataset.blogs[0].slug.clone();
        assert!(
            dataset
                .comments
                .iter()
                .all(|comment| dataset.blogs.iter().any(|blog| blog.slug == comment.blog_slug))
        );
        assert!(dataset.comments.iter().any(|comment| comment.blog_slug == first));
    }
}
