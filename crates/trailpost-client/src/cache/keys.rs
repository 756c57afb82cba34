use super::query::TaggedKey;
use super::tags::{Tag, TagKind};

/// Named queries served through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Blogs,
    BlogBySlug(String),
    TourGuides,
    CommentsByBlog(String),
}

impl QueryKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blogs => "blogs",
            Self::BlogBySlug(_) => "blogBySlug",
            Self::TourGuides => "tourGuides",
            Self::CommentsByBlog(_) => "commentsByBlog",
        }
    }
}

impl TaggedKey for QueryKey {
    fn provides(&self) -> Vec<Tag> {
        match self {
            Self::Blogs => vec![Tag::list(TagKind::Blog)],
            Self::BlogBySlug(slug) => vec![Tag::id(TagKind::Blog, slug.clone())],
            Self::TourGuides => vec![Tag::list(TagKind::TourGuide)],
            Self::CommentsByBlog(slug) => vec![Tag::id(TagKind::Comment, slug.clone())],
        }
    }
}

/// Named mutations and the tags they invalidate on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddComment { blog_slug: String },
    UpdateBlog { slug: String },
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddComment { .. } => "addComment",
            Self::UpdateBlog { .. } => "updateBlog",
        }
    }

    pub fn invalidates(&self) -> Vec<Tag> {
        match self {
            Self::AddComment { blog_slug } => vec![Tag::id(TagKind::Comment, blog_slug.clone())],
            Self::UpdateBlog { slug } => vec![
                Tag::id(TagKind::Blog, slug.clone()),
                Tag::list(TagKind::Blog),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reaches(mutation: &Mutation, key: &QueryKey) -> bool {
        mutation
            .invalidates()
            .iter()
            .any(|tag| key.provides().iter().any(|provided| tag.covers(provided)))
    }

    #[test]
    fn add_comment_reaches_only_that_blogs_comments() {
        let mutation = Mutation::AddComment {
            blog_slug: "x".into(),
        };
        assert!(reaches(&mutation, &QueryKey::CommentsByBlog("x".into())));
        assert!(!reaches(&mutation, &QueryKey::CommentsByBlog("y".into())));
        assert!(!reaches(&mutation, &QueryKey::BlogBySlug("x".into())));
        assert!(!reaches(&mutation, &QueryKey::Blogs));
    }

    #[test]
    fn update_blog_reaches_the_blog_and_the_list() {
        let mutation = Mutation::UpdateBlog { slug: "a".into() };
        assert!(reaches(&mutation, &QueryKey::BlogBySlug("a".into())));
        assert!(reaches(&mutation, &QueryKey::Blogs));
        assert!(!reaches(&mutation, &QueryKey::BlogBySlug("b".into())));
        assert!(!reaches(&mutation, &QueryKey::TourGuides));
        assert!(!reaches(&mutation, &QueryKey::CommentsByBlog("a".into())));
    }
}
