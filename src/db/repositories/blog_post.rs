//! Blog post repository
//!
//! Database operations for blog posts.
//!
//! This module provides:
//! - `BlogPostRepository` trait defining the interface for post data access
//! - `SqlxBlogPostRepository` implementing the trait for SQLite and MySQL
//!
//! Tags are stored as a JSON array so their order and duplicates survive a
//! round trip.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{BlogPost, BlogPostInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Store a fully formed post
    async fn insert(&self, post: &BlogPost) -> Result<()>;

    /// Get post by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<BlogPost>>;

    /// List posts, most recent publish date first
    async fn list(&self, published_only: bool, offset: i64, limit: i64) -> Result<Vec<BlogPost>>;

    /// List published posts carrying `tag`, most recent first
    async fn list_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<BlogPost>>;

    /// Replace the editable fields of a post; `None` if the post does not exist
    async fn replace(
        &self,
        id: &str,
        input: &BlogPostInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<BlogPost>>;

    /// Delete a post; `false` if the post did not exist
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Count all posts
    async fn count(&self) -> Result<i64>;

    /// Tag lists of every published post
    async fn published_tags(&self) -> Result<Vec<Vec<String>>>;
}

/// SQLx-based blog post repository
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxBlogPostRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogPostRepository {
    /// Create a new repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn BlogPostRepository> {
        Arc::new(Self::new(pool))
    }

    fn sqlite(&self) -> Result<&SqlitePool> {
        self.pool
            .as_sqlite()
            .context("SQLite driver selected without a SQLite pool")
    }

    fn mysql(&self) -> Result<&MySqlPool> {
        self.pool
            .as_mysql()
            .context("MySQL driver selected without a MySQL pool")
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepository {
    async fn insert(&self, post: &BlogPost) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_post_sqlite(self.sqlite()?, post).await,
            DatabaseDriver::Mysql => insert_post_mysql(self.mysql()?, post).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_post_sqlite(self.sqlite()?, id).await,
            DatabaseDriver::Mysql => get_post_mysql(self.mysql()?, id).await,
        }
    }

    async fn list(&self, published_only: bool, offset: i64, limit: i64) -> Result<Vec<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_posts_sqlite(self.sqlite()?, published_only, offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_posts_mysql(self.mysql()?, published_only, offset, limit).await
            }
        }
    }

    async fn list_by_tag(&self, tag: &str, limit: i64) -> Result<Vec<BlogPost>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_by_tag_sqlite(self.sqlite()?, tag, limit).await,
            DatabaseDriver::Mysql => list_by_tag_mysql(self.mysql()?, tag, limit).await,
        }
    }

    async fn replace(
        &self,
        id: &str,
        input: &BlogPostInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<BlogPost>> {
        let tags = encode_tags(&input.tags)?;
        let affected = match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                sqlx::query(REPLACE_SQL)
                    .bind(&input.title)
                    .bind(&input.excerpt)
                    .bind(&input.content)
                    .bind(&tags)
                    .bind(&input.read_time)
                    .bind(&input.image)
                    .bind(input.is_published)
                    .bind(updated_at)
                    .bind(id)
                    .execute(self.sqlite()?)
                    .await
                    .context("Failed to update blog post")?
                    .rows_affected()
            }
            DatabaseDriver::Mysql => {
                sqlx::query(REPLACE_SQL)
                    .bind(&input.title)
                    .bind(&input.excerpt)
                    .bind(&input.content)
                    .bind(&tags)
                    .bind(&input.read_time)
                    .bind(&input.image)
                    .bind(input.is_published)
                    .bind(updated_at)
                    .bind(id)
                    .execute(self.mysql()?)
                    .await
                    .context("Failed to update blog post")?
                    .rows_affected()
            }
        };

        // MySQL reports 0 affected rows when nothing changed, so re-read instead
        // of trusting the count.
        if affected == 0 && self.pool.driver() == DatabaseDriver::Sqlite {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                sqlx::query("DELETE FROM blog_posts WHERE id = ?")
                    .bind(id)
                    .execute(self.sqlite()?)
                    .await
                    .context("Failed to delete blog post")?
                    .rows_affected()
            }
            DatabaseDriver::Mysql => {
                sqlx::query("DELETE FROM blog_posts WHERE id = ?")
                    .bind(id)
                    .execute(self.mysql()?)
                    .await
                    .context("Failed to delete blog post")?
                    .rows_affected()
            }
        };
        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count = match self.pool.driver() {
            DatabaseDriver::Sqlite => sqlx::query("SELECT COUNT(*) AS count FROM blog_posts")
                .fetch_one(self.sqlite()?)
                .await
                .context("Failed to count blog posts")?
                .get("count"),
            DatabaseDriver::Mysql => sqlx::query("SELECT COUNT(*) AS count FROM blog_posts")
                .fetch_one(self.mysql()?)
                .await
                .context("Failed to count blog posts")?
                .get("count"),
        };
        Ok(count)
    }

    async fn published_tags(&self) -> Result<Vec<Vec<String>>> {
        const QUERY: &str = "SELECT tags FROM blog_posts WHERE is_published = TRUE";
        let raw: Vec<String> = match self.pool.driver() {
            DatabaseDriver::Sqlite => sqlx::query(QUERY)
                .fetch_all(self.sqlite()?)
                .await
                .context("Failed to read tags")?
                .iter()
                .map(|row| row.get("tags"))
                .collect(),
            DatabaseDriver::Mysql => sqlx::query(QUERY)
                .fetch_all(self.mysql()?)
                .await
                .context("Failed to read tags")?
                .iter()
                .map(|row| row.get("tags"))
                .collect(),
        };
        raw.iter().map(|tags| decode_tags(tags)).collect()
    }
}

const SELECT_COLUMNS: &str = "id, title, excerpt, content, author, publish_date, tags, read_time, image, is_published, created_at, updated_at";

const INSERT_SQL: &str = r#"
    INSERT INTO blog_posts (id, title, excerpt, content, author, publish_date, tags, read_time, image, is_published, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const REPLACE_SQL: &str = r#"
    UPDATE blog_posts
    SET title = ?, excerpt = ?, content = ?, tags = ?, read_time = ?, image = ?, is_published = ?, updated_at = ?
    WHERE id = ?
"#;

fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("Failed to encode tags")
}

fn decode_tags(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).with_context(|| format!("Invalid stored tags: {}", raw))
}

fn list_sql(published_only: bool) -> String {
    let filter = if published_only {
        "WHERE is_published = TRUE"
    } else {
        ""
    };
    format!(
        "SELECT {} FROM blog_posts {} ORDER BY publish_date DESC, seq DESC LIMIT ? OFFSET ?",
        SELECT_COLUMNS, filter
    )
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn insert_post_sqlite(pool: &SqlitePool, post: &BlogPost) -> Result<()> {
    sqlx::query(INSERT_SQL)
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.publish_date)
        .bind(encode_tags(&post.tags)?)
        .bind(&post.read_time)
        .bind(&post.image)
        .bind(post.is_published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(pool)
        .await
        .context("Failed to create blog post")?;
    Ok(())
}

async fn get_post_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<BlogPost>> {
    let row = sqlx::query(&format!("SELECT {} FROM blog_posts WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog post by ID")?;

    row.as_ref().map(row_to_post_sqlite).transpose()
}

async fn list_posts_sqlite(
    pool: &SqlitePool,
    published_only: bool,
    offset: i64,
    limit: i64,
) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(&list_sql(published_only))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to list blog posts")?;

    rows.iter().map(row_to_post_sqlite).collect()
}

async fn list_by_tag_sqlite(pool: &SqlitePool, tag: &str, limit: i64) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {} FROM blog_posts
        WHERE is_published = TRUE
          AND EXISTS (SELECT 1 FROM json_each(blog_posts.tags) WHERE json_each.value = ?)
        ORDER BY publish_date DESC, seq DESC
        LIMIT ?
        "#,
        SELECT_COLUMNS
    ))
    .bind(tag)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("Failed to list blog posts by tag")?;

    rows.iter().map(row_to_post_sqlite).collect()
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<BlogPost> {
    let tags: String = row.get("tags");
    Ok(BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        excerpt: row.get("excerpt"),
        content: row.get("content"),
        author: row.get("author"),
        publish_date: row.get("publish_date"),
        tags: decode_tags(&tags)?,
        read_time: row.get("read_time"),
        image: row.get("image"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn insert_post_mysql(pool: &MySqlPool, post: &BlogPost) -> Result<()> {
    sqlx::query(INSERT_SQL)
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.publish_date)
        .bind(encode_tags(&post.tags)?)
        .bind(&post.read_time)
        .bind(&post.image)
        .bind(post.is_published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(pool)
        .await
        .context("Failed to create blog post")?;
    Ok(())
}

async fn get_post_mysql(pool: &MySqlPool, id: &str) -> Result<Option<BlogPost>> {
    let row = sqlx::query(&format!("SELECT {} FROM blog_posts WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog post by ID")?;

    row.as_ref().map(row_to_post_mysql).transpose()
}

async fn list_posts_mysql(
    pool: &MySqlPool,
    published_only: bool,
    offset: i64,
    limit: i64,
) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(&list_sql(published_only))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to list blog posts")?;

    rows.iter().map(row_to_post_mysql).collect()
}

async fn list_by_tag_mysql(pool: &MySqlPool, tag: &str, limit: i64) -> Result<Vec<BlogPost>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {} FROM blog_posts
        WHERE is_published = TRUE
          AND JSON_CONTAINS(tags, JSON_QUOTE(?))
        ORDER BY publish_date DESC, seq DESC
        LIMIT ?
        "#,
        SELECT_COLUMNS
    ))
    .bind(tag)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("Failed to list blog posts by tag")?;

    rows.iter().map(row_to_post_mysql).collect()
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> Result<BlogPost> {
    let tags: String = row.get("tags");
    Ok(BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        excerpt: row.get("excerpt"),
        content: row.get("content"),
        author: row.get("author"),
        publish_date: row.get("publish_date"),
        tags: decode_tags(&tags)?,
        read_time: row.get("read_time"),
        image: row.get("image"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;

    async fn setup_test_repo() -> SqlxBlogPostRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxBlogPostRepository::new(pool)
    }

    fn input(title: &str, is_published: bool) -> BlogPostInput {
        BlogPostInput {
            title: title.to_string(),
            excerpt: format!("About {}", title),
            content: format!("<p>{}</p>", title),
            tags: vec!["Rust".to_string(), "Web".to_string()],
            read_time: "3 min read".to_string(),
            image: "https://example.com/cover.png".to_string(),
            is_published,
        }
    }

    /// A post published `days_ago` days before now
    fn post_at(title: &str, is_published: bool, days_ago: i64) -> BlogPost {
        let mut post = BlogPost::from_input(input(title, is_published), "Tester");
        post.publish_date = Utc::now() - Duration::days(days_ago);
        post
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = setup_test_repo().await;
        let post = post_at("First", true, 0);
        repo.insert(&post).await.expect("Failed to insert");

        let fetched = repo
            .get_by_id(&post.id)
            .await
            .expect("Failed to get")
            .expect("Post should exist");
        assert_eq!(fetched.id, post.id);
        assert_eq!(fetched.title, "First");
        assert_eq!(fetched.tags, vec!["Rust", "Web"]);
        assert_eq!(fetched.publish_date, post.publish_date);
        assert!(fetched.is_published);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = setup_test_repo().await;
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tags_preserve_order_and_duplicates() {
        let repo = setup_test_repo().await;
        let mut post = post_at("Tags", true, 0);
        post.tags = vec!["b".into(), "a".into(), "b".into()];
        repo.insert(&post).await.unwrap();

        let fetched = repo.get_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(fetched.tags, vec!["b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_list_orders_by_publish_date_desc() {
        let repo = setup_test_repo().await;
        repo.insert(&post_at("Old", true, 10)).await.unwrap();
        repo.insert(&post_at("New", true, 1)).await.unwrap();
        repo.insert(&post_at("Middle", true, 5)).await.unwrap();

        let titles: Vec<String> = repo
            .list(true, 0, 20)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[tokio::test]
    async fn test_list_ties_break_by_insertion_order() {
        let repo = setup_test_repo().await;
        let first = post_at("First", true, 0);
        let mut second = post_at("Second", true, 0);
        second.publish_date = first.publish_date;
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let posts = repo.list(false, 0, 20).await.unwrap();
        assert_eq!(posts[0].title, "Second");
        assert_eq!(posts[1].title, "First");
    }

    #[tokio::test]
    async fn test_list_published_only_excludes_drafts() {
        let repo = setup_test_repo().await;
        repo.insert(&post_at("Public", true, 2)).await.unwrap();
        repo.insert(&post_at("Draft", false, 1)).await.unwrap();

        let public = repo.list(true, 0, 20).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "Public");

        let all = repo.list(false, 0, 20).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Draft");
    }

    #[tokio::test]
    async fn test_list_skip_and_limit() {
        let repo = setup_test_repo().await;
        for i in 0..5 {
            repo.insert(&post_at(&format!("Post {}", i), true, i)).await.unwrap();
        }

        let page = repo.list(true, 1, 2).await.unwrap();
        let titles: Vec<&str> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 1", "Post 2"]);
    }

    #[tokio::test]
    async fn test_list_by_tag() {
        let repo = setup_test_repo().await;
        let mut sql = post_at("SQL", true, 1);
        sql.tags = vec!["SQL".into()];
        let mut draft = post_at("Draft SQL", false, 0);
        draft.tags = vec!["SQL".into()];
        repo.insert(&sql).await.unwrap();
        repo.insert(&draft).await.unwrap();
        repo.insert(&post_at("Rust", true, 2)).await.unwrap();

        let tagged = repo.list_by_tag("SQL", 10).await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].title, "SQL");
        assert!(repo.list_by_tag("Missing", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_overwrites_editable_fields() {
        let repo = setup_test_repo().await;
        let post = post_at("Before", false, 3);
        repo.insert(&post).await.unwrap();

        let replacement = BlogPostInput {
            tags: vec![],
            ..input("After", true)
        };
        let later = Utc::now();
        let updated = repo
            .replace(&post.id, &replacement, later)
            .await
            .unwrap()
            .expect("Post should exist");

        assert_eq!(updated.to_input(), replacement);
        assert_eq!(updated.publish_date, post.publish_date);
        assert_eq!(updated.author, post.author);
        assert_eq!(updated.updated_at, later);
    }

    #[tokio::test]
    async fn test_replace_missing_returns_none() {
        let repo = setup_test_repo().await;
        let result = repo
            .replace("missing", &input("x", true), Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = setup_test_repo().await;
        let post = post_at("Doomed", true, 0);
        repo.insert(&post).await.unwrap();

        assert!(repo.delete(&post.id).await.unwrap());
        assert!(!repo.delete(&post.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_published_tags() {
        let repo = setup_test_repo().await;
        repo.insert(&post_at("A", true, 0)).await.unwrap();
        repo.insert(&post_at("B", false, 0)).await.unwrap();

        let tags = repo.published_tags().await.unwrap();
        assert_eq!(tags, vec![vec!["Rust".to_string(), "Web".to_string()]]);
    }
}
