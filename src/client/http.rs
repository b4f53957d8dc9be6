//! REST client for a remote blog store.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{BlogStore, StoreError};
use crate::api::responses::MessageResponse;
use crate::api::ApiError;
use crate::config::ClientConfig;
use crate::models::{BlogPost, BlogPostInput, ListParams, TagCount};

/// HTTP client for the `/api/blog` endpoints
#[derive(Debug, Clone)]
pub struct HttpBlogClient {
    http: Client,
    base_url: String,
}

impl HttpBlogClient {
    /// Create a client for the store at `config.base_url`
    pub fn new(config: &ClientConfig) -> Result<Self, StoreError> {
        let mut builder = Client::builder().user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| StoreError::Transport(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/blog{}", self.base_url, path)
    }

    fn post_url(&self, id: &str) -> String {
        self.url(&format!("/posts/{}", urlencoding::encode(id)))
    }

    /// List one page of posts
    pub async fn list_page(
        &self,
        published_only: bool,
        params: ListParams,
    ) -> Result<Vec<BlogPost>, StoreError> {
        let request = self.http.get(self.url("/posts")).query(&[
            ("published_only", published_only.to_string()),
            ("limit", params.limit.to_string()),
            ("skip", params.skip.to_string()),
        ]);
        self.fetch(request).await
    }

    /// Published posts carrying `tag`
    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, StoreError> {
        let url = self.url(&format!("/posts/tag/{}", urlencoding::encode(tag)));
        self.fetch(self.http.get(url)).await
    }

    /// Tag usage counts over published posts
    pub async fn tags(&self) -> Result<Vec<TagCount>, StoreError> {
        self.fetch(self.http.get(self.url("/tags"))).await
    }

    /// Ask the store to insert its sample posts, returning the store's message
    pub async fn seed(&self) -> Result<String, StoreError> {
        let response: MessageResponse = self.fetch(self.http.post(self.url("/seed"))).await?;
        Ok(response.message)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_status(status, &body))
    }
}

/// Map a non-success answer to a `StoreError`
fn error_from_status(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => StoreError::Rejected(message),
        _ => StoreError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl BlogStore for HttpBlogClient {
    async fn list(&self, published_only: bool) -> Result<Vec<BlogPost>, StoreError> {
        let request = self
            .http
            .get(self.url("/posts"))
            .query(&[("published_only", published_only)]);
        self.fetch(request).await
    }

    async fn get(&self, id: &str) -> Result<BlogPost, StoreError> {
        self.fetch(self.http.get(self.post_url(id))).await
    }

    async fn create(&self, input: &BlogPostInput) -> Result<BlogPost, StoreError> {
        self.fetch(self.http.post(self.url("/posts")).json(input)).await
    }

    async fn update(&self, id: &str, input: &BlogPostInput) -> Result<BlogPost, StoreError> {
        self.fetch(self.http.put(self.post_url(id)).json(input)).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.send(self.http.delete(self.post_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_store;

    fn input(title: &str, is_published: bool) -> BlogPostInput {
        BlogPostInput {
            title: title.to_string(),
            excerpt: "Excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            tags: vec!["Rust".to_string()],
            read_time: "2 min read".to_string(),
            image: "https://example.com/cover.png".to_string(),
            is_published,
        }
    }

    #[test]
    fn test_error_from_status() {
        assert_eq!(error_from_status(StatusCode::NOT_FOUND, ""), StoreError::NotFound);

        let body = r#"{"error":{"code":"VALIDATION_ERROR","message":"Required fields are empty: title"}}"#;
        assert_eq!(
            error_from_status(StatusCode::BAD_REQUEST, body),
            StoreError::Rejected("Required fields are empty: title".to_string())
        );

        assert_eq!(
            error_from_status(StatusCode::BAD_GATEWAY, "upstream down"),
            StoreError::Server {
                status: 502,
                message: "upstream down".to_string()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpBlogClient::new(&ClientConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: None,
        })
        .unwrap();
        assert_eq!(client.url("/posts"), "http://localhost:8080/api/blog/posts");
        assert_eq!(
            client.post_url("a b"),
            "http://localhost:8080/api/blog/posts/a%20b"
        );
    }

    #[tokio::test]
    async fn test_crud_over_http() {
        let client = spawn_store().await;

        let created = client.create(&input("Over the wire", true)).await.unwrap();
        assert_eq!(client.get(&created.id).await.unwrap(), created);

        let updated = client
            .update(&created.id, &input("Renamed", false))
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert!(client.list(true).await.unwrap().is_empty());
        assert_eq!(client.list(false).await.unwrap().len(), 1);

        client.delete(&created.id).await.unwrap();
        assert_eq!(client.get(&created.id).await, Err(StoreError::NotFound));
        assert_eq!(client.delete(&created.id).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_rejected_input_over_http() {
        let client = spawn_store().await;
        let err = client
            .create(&BlogPostInput {
                image: String::new(),
                ..input("No image", true)
            })
            .await
            .expect_err("Blank image should be rejected");
        assert!(matches!(err, StoreError::Rejected(ref m) if m.contains("image")));
    }

    #[tokio::test]
    async fn test_extras_over_http() {
        let client = spawn_store().await;
        assert_eq!(client.seed().await.unwrap(), "Successfully seeded 3 blog posts");

        let page = client
            .list_page(true, ListParams { skip: 1, limit: 1 })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);

        assert_eq!(client.list_by_tag("SQL").await.unwrap().len(), 1);
        assert!(!client.tags().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let client = HttpBlogClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(2),
        })
        .unwrap();
        assert!(matches!(
            client.list(true).await,
            Err(StoreError::Transport(_))
        ));
    }
}
