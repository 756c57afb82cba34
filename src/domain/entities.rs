//! Domain entities mirrored from persistent storage.

use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorRecord {
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: Vec<String>,
    pub author: AuthorRecord,
    pub date: String,
    pub read_time: String,
    pub hero_image: String,
    pub category: String,
    pub quote: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: Uuid,
    pub blog_slug: String,
    pub author: String,
    pub email: Option<String>,
    pub content: String,
    pub rating: u8,
    pub date: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourGuideRecord {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub reviews: i32,
    pub avatar: String,
    pub specialty: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
