//! Trailpost: travel blog backend serving posts, tour guides, and reader comments.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
