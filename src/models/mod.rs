//! Data models
//!
//! This module contains the data structures shared by the store, the HTTP
//! layer and the client views:
//! - The `BlogPost` entity and its editable `BlogPostInput`
//! - List parameters and tag aggregation results

mod blog_post;

pub use blog_post::{BlogPost, BlogPostInput, ListParams, TagCount};
