//! Database repositories
//!
//! Repository pattern implementations for database access.

pub mod blog_post;

pub use blog_post::{BlogPostRepository, SqlxBlogPostRepository};
