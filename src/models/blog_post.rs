//! Blog post model
//!
//! This module provides:
//! - `BlogPost` entity, the only record with a lifecycle
//! - `BlogPostInput`, the editable shape used by create and update
//! - `ListParams` for skip/limit queries
//! - `TagCount` for tag aggregation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Unique identifier, assigned by the store at creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Short summary shown in list views
    pub excerpt: String,
    /// HTML body, rendered verbatim
    pub content: String,
    /// Author name
    pub author: String,
    /// Publication timestamp, set once at creation
    pub publish_date: DateTime<Utc>,
    /// Tags in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text reading time, e.g. "5 min read"
    pub read_time: String,
    /// Cover image URL
    pub image: String,
    /// Whether the post is visible to public readers
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Build a new record from an input, stamping id and timestamps
    pub fn from_input(input: BlogPostInput, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            author: author.into(),
            publish_date: now,
            tags: input.tags,
            read_time: input.read_time,
            image: input.image,
            is_published: input.is_published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the post is a draft (hidden from public readers)
    pub fn is_draft(&self) -> bool {
        !self.is_published
    }

    /// The editable fields of this post
    pub fn to_input(&self) -> BlogPostInput {
        BlogPostInput {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            read_time: self.read_time.clone(),
            image: self.image.clone(),
            is_published: self.is_published,
        }
    }

    /// Publication date formatted for display, e.g. "January 5, 2025"
    pub fn display_date(&self) -> String {
        self.publish_date.format("%B %-d, %Y").to_string()
    }
}

/// Input for creating a post or replacing an existing post's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostInput {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub read_time: String,
    pub image: String,
    #[serde(default = "default_is_published")]
    pub is_published: bool,
}

fn default_is_published() -> bool {
    true
}

impl Default for BlogPostInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            tags: Vec::new(),
            read_time: String::new(),
            image: String::new(),
            is_published: true,
        }
    }
}

impl BlogPostInput {
    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
            ("read_time", &self.read_time),
            ("image", &self.image),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Set the publication flag
    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Skip/limit parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Number of posts to skip
    pub skip: u32,
    /// Maximum number of posts to return
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { skip: 0, limit: 20 }
    }
}

impl ListParams {
    /// Create new list parameters, clamping `limit` into `1..=max_limit`
    pub fn new(skip: u32, limit: u32, max_limit: u32) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    /// Offset for database queries
    pub fn offset(&self) -> i64 {
        self.skip as i64
    }

    /// Limit for database queries
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

/// Number of published posts carrying a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}
