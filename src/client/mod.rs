//! Blog store client
//!
//! `BlogStore` is the contract the client views are written against. Two
//! implementations exist:
//! - `HttpBlogClient`, talking to a remote store over the REST API
//! - `BlogService` itself, for in-process use
//!
//! Errors are a closed `StoreError` enum so callers handle `NotFound`
//! separately from transport failures.

mod http;
mod local;

pub use http::HttpBlogClient;

use async_trait::async_trait;

use crate::models::{BlogPost, BlogPostInput};

/// Failure of a single store request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The post does not exist
    #[error("Blog post not found")]
    NotFound,

    /// The store refused the input
    #[error("Rejected by the blog store: {0}")]
    Rejected(String),

    /// The store answered with an unexpected status
    #[error("Blog store error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never got an answer
    #[error("Transport error: {0}")]
    Transport(String),

    /// The answer could not be decoded
    #[error("Failed to decode blog store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Operations the blog views need from the store
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// List posts, most recent first; drafts excluded when `published_only`
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, StoreError>;

    /// Fetch a single post
    async fn get(&self, id: &str) -> Result<BlogPost, StoreError>;

    /// Create a post; the store assigns id and publish date
    async fn create(&self, input: &BlogPostInput) -> Result<BlogPost, StoreError>;

    /// Replace all editable fields of a post
    async fn update(&self, id: &str, input: &BlogPostInput) -> Result<BlogPost, StoreError>;

    /// Delete a post; a second delete fails with `NotFound`
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
