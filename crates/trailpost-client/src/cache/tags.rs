use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Blog,
    Comment,
    TourGuide,
}

impl TagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::Comment => "Comment",
            Self::TourGuide => "TourGuide",
        }
    }
}

/// Second half of a tag: the collection marker or a resource id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagId {
    List,
    Key(String),
}

/// A resource kind, optionally narrowed to one id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<TagId>,
}

impl Tag {
    /// Matches every tag of `kind` when invalidated.
    pub fn kind(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    pub fn list(kind: TagKind) -> Self {
        Self {
            kind,
            id: Some(TagId::List),
        }
    }

    pub fn id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(TagId::Key(id.into())),
        }
    }

    /// Whether invalidating `self` reaches an entry that provides `provided`.
    pub fn covers(&self, provided: &Tag) -> bool {
        self.kind == provided.kind && (self.id.is_none() || self.id == provided.id)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            None => write!(f, "{}", self.kind.as_str()),
            Some(TagId::List) => write!(f, "{}:LIST", self.kind.as_str()),
            Some(TagId::Key(id)) => write!(f, "{}:{id}", self.kind.as_str()),
        }
    }
}
