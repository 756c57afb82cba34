//! Declarative query cache with tag-based invalidation.
//!
//! Queries name the tags they provide; mutations name the tags they
//! invalidate. Concurrent reads of the same key share one fetch.

mod keys;
mod lock;
mod query;
mod registry;
mod tags;

pub use keys::{Mutation, QueryKey};
pub use query::{QueryCache, TaggedKey};
pub use tags::{Tag, TagId, TagKind};
