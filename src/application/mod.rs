//! Application services layer.

pub mod blogs;
pub mod comments;
pub mod error;
pub mod fixtures;
pub mod repos;
pub mod seed;
pub mod tour_guides;
