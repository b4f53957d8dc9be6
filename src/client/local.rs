//! In-process store: the views driven directly by `BlogService`.

use async_trait::async_trait;

use super::{BlogStore, StoreError};
use crate::models::{BlogPost, BlogPostInput};
use crate::services::{BlogService, BlogServiceError};

impl From<BlogServiceError> for StoreError {
    fn from(err: BlogServiceError) -> Self {
        match err {
            BlogServiceError::NotFound(_) => StoreError::NotFound,
            BlogServiceError::ValidationError(message) => StoreError::Rejected(message),
            BlogServiceError::InternalError(e) => StoreError::Server {
                status: 500,
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl BlogStore for BlogService {
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, StoreError> {
        let params = self.list_params(None, None);
        Ok(BlogService::list(self, published_only, params).await?)
    }

    async fn get(&self, id: &str) -> Result<BlogPost, StoreError> {
        Ok(BlogService::get(self, id).await?)
    }

    async fn create(&self, input: &BlogPostInput) -> Result<BlogPost, StoreError> {
        Ok(BlogService::create(self, input.clone()).await?)
    }

    async fn update(&self, id: &str, input: &BlogPostInput) -> Result<BlogPost, StoreError> {
        Ok(BlogService::update(self, id, input.clone()).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        Ok(BlogService::delete(self, id).await?)
    }
}
