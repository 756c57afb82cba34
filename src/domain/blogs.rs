//! Blog update rules.

use time::OffsetDateTime;

use crate::domain::entities::BlogRecord;
use crate::domain::error::BlogViolation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl AuthorPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none() && self.bio.is_none()
    }
}

/// Fields supplied by a partial blog update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<Vec<String>>,
    pub author: AuthorPatch,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub hero_image: Option<String>,
    pub category: Option<String>,
    pub quote: Option<String>,
}

impl BlogPatch {
    /// Validate the supplied fields and normalize them for storage.
    ///
    /// The stored record already satisfies the title and content rules, so a
    /// merged record is valid exactly when the supplied replacements are.
    pub fn normalize(mut self) -> Result<Self, BlogViolation> {
        if let Some(title) = self.title.as_mut() {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(BlogViolation::EmptyTitle);
            }
            *title = trimmed.to_string();
        }

        if let Some(content) = self.content.take() {
            let paragraphs: Vec<String> = content
                .into_iter()
                .filter(|paragraph| !paragraph.trim().is_empty())
                .collect();
            if paragraphs.is_empty() {
                return Err(BlogViolation::EmptyContent);
            }
            self.content = Some(paragraphs);
        }

        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.author.is_empty()
            && self.date.is_none()
            && self.read_time.is_none()
            && self.hero_image.is_none()
            && self.category.is_none()
            && self.quote.is_none()
    }

    /// Merge the patch into `record`, refreshing `updated_at`.
    pub fn apply(&self, record: &mut BlogRecord, now: OffsetDateTime) {
        fn merge(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        merge(&mut record.title, &self.title);
        merge(&mut record.excerpt, &self.excerpt);
        if let Some(content) = self.content.as_ref() {
            record.content.clone_from(content);
        }
        merge(&mut record.author.name, &self.author.name);
        merge(&mut record.author.avatar, &self.author.avatar);
        merge(&mut record.author.bio, &self.author.bio);
        merge(&mut record.date, &self.date);
        merge(&mut record.read_time, &self.read_time);
        merge(&mut record.hero_image, &self.hero_image);
        merge(&mut record.category, &self.category);
        merge(&mut record.quote, &self.quote);
        record.updated_at = now;
    }
}

/// A body may repeat the slug it addresses but never rename the blog.
pub fn ensure_slug_unchanged(path_slug: &str, body_slug: Option<&str>) -> Result<(), BlogViolation> {
    match body_slug {
        Some(slug) if slug != path_slug => Err(BlogViolation::SlugChanged),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthorRecord;
    use time::macros::datetime;
    use uuid::Uuid;

    fn blog() -> BlogRecord {
        BlogRecord {
            id: Uuid::new_v4(),
            slug: "kyoto-temples-autumn".into(),
            title: "Kyoto temples".into(),
            excerpt: "Maples and moss".into(),
            content: vec!["First".into(), "Second".into()],
            author: AuthorRecord {
                name: "Aiko".into(),
                avatar: "https://example.test/aiko.jpg".into(),
                bio: "Photographer".into(),
            },
            date: "12 Nov 2023".into(),
            read_time: "6 min read".into(),
            hero_image: "https://example.test/hero.jpg".into(),
            category: "Culture".into(),
            quote: "Stillness".into(),
            created_at: datetime!(2023-11-12 08:00 UTC),
            updated_at: datetime!(2023-11-12 08:00 UTC),
        }
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut record = blog();
        let before = record.clone();
        let now = datetime!(2024-01-01 00:00 UTC);
        let patch = BlogPatch {
            title: Some("Kyoto in autumn".into()),
            author: AuthorPatch {
                bio: Some("Writer and photographer".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        patch.apply(&mut record, now);

        assert_eq!(record.title, "Kyoto in autumn");
        assert_eq!(record.author.bio, "Writer and photographer");
        assert_eq!(record.author.name, before.author.name);
        assert_eq!(record.author.avatar, before.author.avatar);
        assert_eq!(record.content, before.content);
        assert_eq!(record.excerpt, before.excerpt);
        assert_eq!(record.created_at, before.created_at);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn normalize_rejects_blank_title() {
        let patch = BlogPatch {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(patch.normalize(), Err(BlogViolation::EmptyTitle));
    }

    #[test]
    fn normalize_drops_blank_paragraphs_and_rejects_empty_content() {
        let patch = BlogPatch {
            content: Some(vec!["One".into(), "  ".into(), "Two".into()]),
            ..Default::default()
        };
        let normalized = patch.normalize().expect("valid");
        assert_eq!(
            normalized.content,
            Some(vec!["One".to_string(), "Two".to_string()])
        );

        let empty = BlogPatch {
            content: Some(vec![String::new()]),
            ..Default::default()
        };
        assert_eq!(empty.normalize(), Err(BlogViolation::EmptyContent));
    }

    #[test]
    fn slug_may_be_echoed_but_not_changed() {
        assert!(ensure_slug_unchanged("kyoto", None).is_ok());
        assert!(ensure_slug_unchanged("kyoto", Some("kyoto")).is_ok());
        assert_eq!(
            ensure_slug_unchanged("kyoto", Some("osaka")),
            Err(BlogViolation::SlugChanged)
        );
    }

    #[test]
    fn empty_patch_reports_empty() {
        assert!(BlogPatch::default().is_empty());
        let patch = BlogPatch {
            author: AuthorPatch {
                name: Some("A".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
