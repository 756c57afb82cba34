//! Seed fixtures: bundled JSON documents or a directory supplied at runtime.

use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const BLOGS_FILE: &str = "blogs.json";
pub const BLOG_DATA_FILE: &str = "blog-data.json";

static BUNDLED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/fixtures");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture `{name}` is missing")]
    Missing { name: &'static str },
    #[error("failed to read fixture `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture `{name}` is not valid: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFixture {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFixture {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: Vec<String>,
    #[serde(default)]
    pub author: AuthorFixture,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quote: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourGuideFixture {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i32,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub specialty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFixture {
    #[serde(default)]
    pub blog_slug: Option<String>,
    pub author: String,
    #[serde(default)]
    pub email: Option<String>,
    pub content: String,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlogsDocument {
    #[serde(default)]
    blogs: Vec<BlogFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogDataDocument {
    #[serde(default)]
    tour_guides: Vec<TourGuideFixture>,
    #[serde(default)]
    comments: Vec<CommentFixture>,
}

#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub blogs: Vec<BlogFixture>,
    pub tour_guides: Vec<TourGuideFixture>,
    pub comments: Vec<CommentFixture>,
}

impl Fixtures {
    /// Fixtures compiled into the binary.
    pub fn bundled() -> Result<Self, FixtureError> {
        let blogs = BUNDLED
            .get_file(BLOGS_FILE)
            .ok_or(FixtureError::Missing { name: BLOGS_FILE })?;
        let blog_data = BUNDLED
            .get_file(BLOG_DATA_FILE)
            .ok_or(FixtureError::Missing {
                name: BLOG_DATA_FILE,
            })?;
        Self::from_json(blogs.contents(), blog_data.contents())
    }

    /// Load `blogs.json` and `blog-data.json` from `dir`.
    pub async fn from_dir(dir: &Path) -> Result<Self, FixtureError> {
        let blogs = read_fixture(&dir.join(BLOGS_FILE)).await?;
        let blog_data = read_fixture(&dir.join(BLOG_DATA_FILE)).await?;
        Self::from_json(&blogs, &blog_data)
    }

    pub fn from_json(blogs: &[u8], blog_data: &[u8]) -> Result<Self, FixtureError> {
        let BlogsDocument { blogs } =
            serde_json::from_slice(blogs).map_err(|source| FixtureError::Parse {
                name: BLOGS_FILE,
                source,
            })?;
        let BlogDataDocument {
            tour_guides,
            comments,
        } = serde_json::from_slice(blog_data).map_err(|source| FixtureError::Parse {
            name: BLOG_DATA_FILE,
            source,
        })?;

        Ok(Self {
            blogs,
            tour_guides,
            comments,
        })
    }
}

async fn read_fixture(path: &Path) -> Result<Vec<u8>, FixtureError> {
    tokio::fs::read(path).await.map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().expect("bundled fixtures");
        assert!(!fixtures.blogs.is_empty());
        assert!(!fixtures.tour_guides.is_empty());
        assert!(!fixtures.comments.is_empty());
        assert!(fixtures.blogs.iter().all(|blog| !blog.content.is_empty()));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let fixtures = Fixtures::from_json(br#"{}"#, br#"{"comments": []}"#).expect("parse");
        assert!(fixtures.blogs.is_empty());
        assert!(fixtures.tour_guides.is_empty());
    }

    #[test]
    fn parse_errors_name_the_document() {
        let err = Fixtures::from_json(b"[", b"{}").expect_err("invalid json");
        assert!(matches!(err, FixtureError::Parse { name: BLOGS_FILE, .. }));
    }

    #[tokio::test]
    async fn from_dir_reads_both_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(BLOGS_FILE),
            br#"{"blogs":[{"slug":"a-trip","title":"A trip","content":["Day one"]}]}"#,
        )
        .expect("write blogs");
        std::fs::write(
            dir.path().join(BLOG_DATA_FILE),
            br#"{"tourGuides":[{"name":"Sam"}],"comments":[]}"#,
        )
        .expect("write blog data");

        let fixtures = Fixtures::from_dir(dir.path()).await.expect("load");
        assert_eq!(fixtures.blogs[0].slug, "a-trip");
        assert_eq!(fixtures.tour_guides[0].name, "Sam");
    }

    #[tokio::test]
    async fn from_dir_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Fixtures::from_dir(dir.path()).await.expect_err("missing");
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
