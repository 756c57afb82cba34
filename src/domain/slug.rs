//! Slug checks for records that are addressed by slug.

use slug::slugify;

/// Whether `input` is already in canonical slug form (`lowercase-words-123`).
pub fn is_canonical_slug(input: &str) -> bool {
    !input.is_empty() && slugify(input) == input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_lowercase() {
        assert!(is_canonical_slug("hidden-gems-bali-indonesia"));
        assert!(is_canonical_slug("top-10-hikes"));
    }

    #[test]
    fn rejects_spaces_case_and_empty() {
        assert!(!is_canonical_slug(""));
        assert!(!is_canonical_slug("Hidden Gems"));
        assert!(!is_canonical_slug("bali/indonesia"));
    }
}
