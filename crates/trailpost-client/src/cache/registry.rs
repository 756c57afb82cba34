//! Bidirectional tag registry.
//!
//! Tracks which cache keys provide which tags so an invalidation can find
//! every affected entry without scanning the cache.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::tags::Tag;

/// Tracks tag → keys and key → tags mappings.
///
/// Not synchronized on its own; lives inside the query cache state.
#[derive(Debug)]
pub(crate) struct TagRegistry<K> {
    tag_to_keys: HashMap<Tag, HashSet<K>>,
    key_to_tags: HashMap<K, Vec<Tag>>,
}

impl<K: Clone + Eq + Hash> TagRegistry<K> {
    pub(crate) fn new() -> Self {
        Self {
            tag_to_keys: HashMap::new(),
            key_to_tags: HashMap::new(),
        }
    }

    /// Register a key with the tags it provides, replacing earlier tags.
    pub(crate) fn register(&mut self, key: K, tags: Vec<Tag>) {
        self.unregister(&key);
        for tag in &tags {
            self.tag_to_keys
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }
        self.key_to_tags.insert(key, tags);
    }

    /// Remove a key and clean up its tag mappings.
    pub(crate) fn unregister(&mut self, key: &K) {
        if let Some(tags) = self.key_to_tags.remove(key) {
            for tag in tags {
                if let Some(keys) = self.tag_to_keys.get_mut(&tag) {
                    keys.remove(key);
                    if keys.is_empty() {
                        self.tag_to_keys.remove(&tag);
                    }
                }
            }
        }
    }

    /// Keys reached by invalidating `tag`. A bare kind reaches every tag of that kind.
    pub(crate) fn keys_for(&self, tag: &Tag) -> HashSet<K> {
        if tag.id.is_some() {
            return self.tag_to_keys.get(tag).cloned().unwrap_or_default();
        }

        self.tag_to_keys
            .iter()
            .filter(|(provided, _)| tag.covers(provided))
            .flat_map(|(_, keys)| keys.iter().cloned())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.key_to_tags.len()
    }
}
