//! Request and response shapes shared by the trailpost server and its clients.
//!
//! Every type serializes with camelCase keys and RFC 3339 timestamps.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: Vec<String>,
    #[serde(default)]
    pub author: Author,
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
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub blog_slug: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub content: String,
    pub rating: u8,
    pub date: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourGuide {
    pub id: Uuid,
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
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body of `POST /api/comments`.
///
/// String fields of the wrong JSON type decode as absent so the server can
/// answer with its field message instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub blog_slug: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
}

impl CreateCommentRequest {
    pub fn new(
        blog_slug: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            blog_slug: Some(blog_slug.into()),
            author: Some(author.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(Value::from(rating));
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Partial author update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Body of `PUT /api/blogs/{slug}`.
///
/// Unknown keys are ignored, so a client may send back a full `Blog` with a
/// few fields changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Ok(Some(value)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrongly_typed_comment_fields_decode_as_absent() {
        let body: CreateCommentRequest = serde_json::from_value(json!({
            "blogSlug": 42,
            "author": ["Jo"],
            "content": "Great read",
            "rating": "4"
        }))
        .expect("lenient decode");

        assert_eq!(body.blog_slug, None);
        assert_eq!(body.author, None);
        assert_eq!(body.content.as_deref(), Some("Great read"));
        assert_eq!(body.rating, Some(json!("4")));
    }

    #[test]
    fn null_rating_is_absent() {
        let body: CreateCommentRequest =
            serde_json::from_value(json!({ "rating": null })).expect("decode");
        assert_eq!(body.rating, None);
    }

    #[test]
    fn update_request_ignores_echoed_blog_fields() {
        let body: UpdateBlogRequest = serde_json::from_value(json!({
            "id": "4a4d0c3e-2fd1-4d43-9d0c-9a58f3f3f1aa",
            "slug": "kyoto",
            "title": "Kyoto in autumn",
            "createdAt": "2024-03-07T10:00:00Z",
            "author": { "bio": "Writer" }
        }))
        .expect("decode");

        assert_eq!(body.slug.as_deref(), Some("kyoto"));
        assert_eq!(body.title.as_deref(), Some("Kyoto in autumn"));
        assert_eq!(body.content, None);
        assert_eq!(
            body.author,
            Some(AuthorPatch {
                bio: Some("Writer".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn blog_uses_camel_case_and_rfc3339() {
        let blog = Blog {
            id: Uuid::nil(),
            slug: "kyoto".into(),
            title: "Kyoto".into(),
            excerpt: String::new(),
            content: vec!["One".into()],
            author: Author::default(),
            date: "7 Mar 2024".into(),
            read_time: "5 min".into(),
            hero_image: String::new(),
            category: String::new(),
            quote: String::new(),
            created_at: time::macros::datetime!(2024-03-07 10:00 UTC),
            updated_at: time::macros::datetime!(2024-03-07 10:00 UTC),
        };

        let value = serde_json::to_value(&blog).expect("serialize");
        assert_eq!(value["readTime"], "5 min");
        assert_eq!(value["createdAt"], "2024-03-07T10:00:00Z");
    }
}
