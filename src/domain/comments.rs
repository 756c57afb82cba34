//! Reader comment rules: validation, rating sanitization, and the values the
//! server assigns at creation time.

use serde_json::Value;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::domain::error::CommentViolation;

pub const MIN_AUTHOR_CHARS: usize = 2;
pub const MIN_CONTENT_CHARS: usize = 3;
pub const DEFAULT_RATING: u8 = 5;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";
const DISPLAY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none] [month repr:short] [year]");

/// Raw comment fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct CommentSubmission {
    pub blog_slug: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub rating: Option<Value>,
}

/// A submission that passed validation, trimmed and with its rating settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidComment {
    pub blog_slug: String,
    pub author: String,
    pub content: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub rating: u8,
}

impl CommentSubmission {
    pub fn validate(self) -> Result<ValidComment, CommentViolation> {
        let blog_slug = self
            .blog_slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .ok_or(CommentViolation::MissingBlogSlug)?
            .to_string();

        let author = trimmed_with_min(self.author.as_deref(), MIN_AUTHOR_CHARS)
            .ok_or(CommentViolation::AuthorTooShort)?;
        let content = trimmed_with_min(self.content.as_deref(), MIN_CONTENT_CHARS)
            .ok_or(CommentViolation::ContentTooShort)?;

        Ok(ValidComment {
            blog_slug,
            author,
            content,
            email: non_blank(self.email.as_deref()),
            avatar: non_blank(self.avatar.as_deref()),
            rating: sanitize_rating(self.rating.as_ref()),
        })
    }
}

fn trimmed_with_min(value: Option<&str>, min_chars: usize) -> Option<String> {
    let trimmed = value?.trim();
    (trimmed.chars().count() >= min_chars).then(|| trimmed.to_string())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Keep an integer-valued number in `[1, 5]`; anything else becomes 5.
pub fn sanitize_rating(value: Option<&Value>) -> u8 {
    let Some(Value::Number(number)) = value else {
        return DEFAULT_RATING;
    };

    let candidate = match number.as_i64() {
        Some(integer) => Some(integer),
        None => number
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.is_finite())
            .map(|float| float as i64),
    };

    candidate
        .and_then(|rating| u8::try_from(rating).ok())
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        .unwrap_or(DEFAULT_RATING)
}

/// `D Mon YYYY` in UTC, e.g. `7 Mar 2024`.
pub fn display_date(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    utc.format(DISPLAY_DATE)
        .unwrap_or_else(|_| utc.date().to_string())
}

/// Generated initials avatar for a comment author.
pub fn avatar_url(author: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("name", author)
        .append_pair("background", "random")
        .append_pair("color", "fff")
        .append_pair("size", "128")
        .finish();
    format!("{AVATAR_ENDPOINT}?{query}")
}
