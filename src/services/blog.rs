//! Blog service
//!
//! Implements the blog store semantics on top of the repository:
//! - List (optionally published only), get, create, full-replace update, delete
//! - Server-side validation of required fields
//! - Tag listings and tag counts over published posts
//! - Seeding an empty store with sample posts

use crate::config::BlogConfig;
use crate::db::repositories::BlogPostRepository;
use crate::models::{BlogPost, BlogPostInput, ListParams, TagCount};
use crate::services::seed;
use anyhow::Context;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

/// Error types for blog service operations
#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    /// No post with the given id
    #[error("Blog post not found: {0}")]
    NotFound(String),

    /// Input rejected before reaching the database
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Result of a seed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held this many posts, nothing was inserted
    AlreadySeeded(i64),
    /// This many sample posts were inserted
    Seeded(usize),
}

impl SeedOutcome {
    /// Human-readable summary returned by the API
    pub fn message(&self) -> String {
        match self {
            SeedOutcome::AlreadySeeded(count) => {
                format!("Database already has {} blog posts", count)
            }
            SeedOutcome::Seeded(count) => format!("Successfully seeded {} blog posts", count),
        }
    }
}

/// Blog service, the single source of truth for blog posts
pub struct BlogService {
    repo: Arc<dyn BlogPostRepository>,
    config: BlogConfig,
}

impl BlogService {
    /// Create a new blog service
    pub fn new(repo: Arc<dyn BlogPostRepository>, config: BlogConfig) -> Self {
        Self { repo, config }
    }

    /// List parameters with configured defaults and bounds applied
    pub fn list_params(&self, skip: Option<u32>, limit: Option<u32>) -> ListParams {
        ListParams::new(
            skip.unwrap_or(0),
            limit.unwrap_or(self.config.page_size),
            self.config.max_page_size,
        )
    }

    /// List posts, most recent publish date first
    ///
    /// Drafts are excluded when `published_only` is set.
    pub async fn list(
        &self,
        published_only: bool,
        params: ListParams,
    ) -> Result<Vec<BlogPost>, BlogServiceError> {
        let posts = self
            .repo
            .list(published_only, params.offset(), params.limit())
            .await
            .context("Failed to list blog posts")?;
        Ok(posts)
    }

    /// Get a post by id
    pub async fn get(&self, id: &str) -> Result<BlogPost, BlogServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get blog post")?
            .ok_or_else(|| BlogServiceError::NotFound(id.to_string()))
    }

    /// Create a post, assigning its id, author and publish date
    pub async fn create(&self, input: BlogPostInput) -> Result<BlogPost, BlogServiceError> {
        Self::validate(&input)?;

        let post = BlogPost::from_input(input, self.config.default_author.clone());
        self.repo
            .insert(&post)
            .await
            .context("Failed to create blog post")?;

        tracing::info!(id = %post.id, published = post.is_published, "Blog post created");
        Ok(post)
    }

    /// Replace every editable field of a post
    ///
    /// `publish_date` and `author` are left untouched.
    pub async fn update(
        &self,
        id: &str,
        input: BlogPostInput,
    ) -> Result<BlogPost, BlogServiceError> {
        Self::validate(&input)?;

        let post = self
            .repo
            .replace(id, &input, Utc::now())
            .await
            .context("Failed to update blog post")?
            .ok_or_else(|| BlogServiceError::NotFound(id.to_string()))?;

        tracing::info!(id = %post.id, published = post.is_published, "Blog post updated");
        Ok(post)
    }

    /// Delete a post; deleting a missing post is `NotFound`
    pub async fn delete(&self, id: &str) -> Result<(), BlogServiceError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete blog post")?;
        if !deleted {
            return Err(BlogServiceError::NotFound(id.to_string()));
        }
        tracing::info!(id = %id, "Blog post deleted");
        Ok(())
    }

    /// Published posts carrying `tag`, most recent first
    pub async fn list_by_tag(
        &self,
        tag: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BlogPost>, BlogServiceError> {
        let limit = limit
            .unwrap_or(self.config.tag_page_size)
            .clamp(1, self.config.max_page_size.max(1));
        let posts = self
            .repo
            .list_by_tag(tag, limit as i64)
            .await
            .context("Failed to list blog posts by tag")?;
        Ok(posts)
    }

    /// Number of published posts per tag, most used first
    pub async fn tag_counts(&self) -> Result<Vec<TagCount>, BlogServiceError> {
        let tag_lists = self
            .repo
            .published_tags()
            .await
            .context("Failed to read tags")?;
        Ok(count_tags(tag_lists))
    }

    /// Insert the sample posts if the store is empty
    pub async fn seed(&self) -> Result<SeedOutcome, BlogServiceError> {
        let existing = self.repo.count().await.context("Failed to count blog posts")?;
        if existing > 0 {
            return Ok(SeedOutcome::AlreadySeeded(existing));
        }

        let samples = seed::sample_posts();
        let count = samples.len();
        for input in samples {
            self.create(input).await?;
        }

        tracing::info!("Seeded {} blog posts", count);
        Ok(SeedOutcome::Seeded(count))
    }

    fn validate(input: &BlogPostInput) -> Result<(), BlogServiceError> {
        let missing = input.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BlogServiceError::ValidationError(format!(
                "Required fields are empty: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Count tag occurrences, sorted by count descending then tag ascending
fn count_tags(tag_lists: Vec<Vec<String>>) -> Vec<TagCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for tag in tag_lists.into_iter().flatten() {
        *counts.entry(tag).or_insert(0) += 1;
    }

    let mut result: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxBlogPostRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_service() -> BlogService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        BlogService::new(SqlxBlogPostRepository::boxed(pool), BlogConfig::default())
    }

    fn input(title: &str, is_published: bool) -> BlogPostInput {
        BlogPostInput {
            title: title.to_string(),
            excerpt: "Excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            tags: vec!["React".to_string(), "JavaScript".to_string()],
            read_time: "5 min read".to_string(),
            image: "https://example.com/cover.png".to_string(),
            is_published,
        }
    }

    async fn pause() {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id_and_author() {
        let service = setup_test_service().await;
        let existing = service.create(input("One", true)).await.unwrap();
        let created = service.create(input("Two", true)).await.unwrap();

        assert_ne!(created.id, existing.id);
        assert_eq!(created.author, "Site Author");

        let all = service.list(false, service.list_params(None, None)).await.unwrap();
        assert!(all.iter().any(|p| p.id == created.id));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_required_fields() {
        let service = setup_test_service().await;
        let err = service
            .create(BlogPostInput {
                excerpt: " ".to_string(),
                ..input("Title", true)
            })
            .await
            .expect_err("Blank excerpt should be rejected");
        assert!(matches!(err, BlogServiceError::ValidationError(ref m) if m.contains("excerpt")));
    }

    #[tokio::test]
    async fn test_create_accepts_empty_tags() {
        let service = setup_test_service().await;
        let post = service
            .create(input("No tags", true).with_tags(Vec::<String>::new()))
            .await
            .unwrap();
        assert!(post.tags.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = setup_test_service().await;
        assert!(matches!(
            service.get("nope").await,
            Err(BlogServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let service = setup_test_service().await;
        let post = service.create(input("Original", false)).await.unwrap();

        let draft = BlogPostInput {
            title: "Replaced".to_string(),
            excerpt: "New excerpt".to_string(),
            content: "<p>New</p>".to_string(),
            tags: vec![],
            read_time: "1 min read".to_string(),
            image: "https://example.com/new.png".to_string(),
            is_published: true,
        };
        service.update(&post.id, draft.clone()).await.unwrap();

        let fetched = service.get(&post.id).await.unwrap();
        assert_eq!(fetched.to_input(), draft);
        assert_eq!(fetched.publish_date, post.publish_date);
        assert!(fetched.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = setup_test_service().await;
        assert!(matches!(
            service.update("nope", input("x", true)).await,
            Err(BlogServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_not_idempotent() {
        let service = setup_test_service().await;
        let post = service.create(input("Doomed", true)).await.unwrap();

        service.delete(&post.id).await.unwrap();
        assert!(matches!(
            service.get(&post.id).await,
            Err(BlogServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&post.id).await,
            Err(BlogServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_public_list_never_contains_drafts() {
        let service = setup_test_service().await;
        for i in 0..6 {
            service.create(input(&format!("Post {}", i), i % 2 == 0)).await.unwrap();
        }

        let public = service.list(true, service.list_params(None, None)).await.unwrap();
        assert_eq!(public.len(), 3);
        assert!(public.iter().all(|p| p.is_published));
    }

    #[tokio::test]
    async fn test_publishing_a_draft_makes_it_featured() {
        let service = setup_test_service().await;
        service.create(input("Older", true)).await.unwrap();
        pause().await;
        let draft = service.create(input("Draft", false)).await.unwrap();

        let params = service.list_params(None, None);
        assert!(service.list(false, params).await.unwrap().iter().any(|p| p.id == draft.id));
        assert!(!service.list(true, params).await.unwrap().iter().any(|p| p.id == draft.id));

        service
            .update(&draft.id, draft.to_input().with_published(true))
            .await
            .unwrap();

        let public = service.list(true, params).await.unwrap();
        assert_eq!(public[0].id, draft.id);
    }

    #[tokio::test]
    async fn test_list_params_apply_config() {
        let service = setup_test_service().await;
        assert_eq!(service.list_params(None, None), ListParams { skip: 0, limit: 20 });
        assert_eq!(service.list_params(Some(3), Some(1000)).limit, 100);
    }

    #[tokio::test]
    async fn test_list_by_tag_and_counts() {
        let service = setup_test_service().await;
        service.create(input("A", true).with_tags(["SQL", "Data"])).await.unwrap();
        service.create(input("B", true).with_tags(["SQL"])).await.unwrap();
        service.create(input("C", false).with_tags(["SQL", "Hidden"])).await.unwrap();

        assert_eq!(service.list_by_tag("SQL", None).await.unwrap().len(), 2);

        let counts = service.tag_counts().await.unwrap();
        assert_eq!(
            counts,
            vec![
                TagCount { tag: "SQL".to_string(), count: 2 },
                TagCount { tag: "Data".to_string(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_store() {
        let service = setup_test_service().await;
        let first = service.seed().await.unwrap();
        assert_eq!(first, SeedOutcome::Seeded(3));
        assert_eq!(first.message(), "Successfully seeded 3 blog posts");

        let second = service.seed().await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadySeeded(3));
        assert_eq!(second.message(), "Database already has 3 blog posts");
    }

    #[test]
    fn test_count_tags_orders_ties_alphabetically() {
        let counts = count_tags(vec![
            vec!["b".into(), "a".into()],
            vec!["c".into(), "a".into()],
        ]);
        let tags: Vec<&str> = counts.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
        assert_eq!(counts[0].count, 2);
    }
}
