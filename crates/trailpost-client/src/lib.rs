//! Client side of trailpost: a typed HTTP client, a tag-invalidated query
//! cache on top of it, and the `trailpost-cli` front end.

pub mod api;
pub mod cache;
pub mod cli;
pub mod client;

pub use api::{ApiResult, BlogApi};
pub use client::{ApiClient, ClientError};
