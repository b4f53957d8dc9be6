//! Blog API endpoints
//!
//! - GET /api/blog/posts - List posts (`published_only`, `limit`, `skip`)
//! - GET /api/blog/posts/{id} - Get one post
//! - POST /api/blog/posts - Create a post
//! - PUT /api/blog/posts/{id} - Replace a post's editable fields
//! - DELETE /api/blog/posts/{id} - Delete a post
//! - GET /api/blog/posts/tag/{tag} - Published posts with a tag
//! - GET /api/blog/tags - Tag usage counts
//! - POST /api/blog/seed - Insert sample posts into an empty store

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::MessageResponse;
use crate::models::{BlogPost, BlogPostInput, TagCount};

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Public readers only see published posts
    #[serde(default = "default_published_only")]
    pub published_only: bool,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

fn default_published_only() -> bool {
    true
}

/// Query parameters for tag listings
#[derive(Debug, Deserialize)]
pub struct TagPostsQuery {
    pub limit: Option<u32>,
}

/// Build the blog router, mounted under `/api/blog`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/tag/{tag}", get(posts_by_tag))
        .route("/tags", get(list_tags))
        .route("/seed", post(seed_posts))
}

/// GET /api/blog/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let params = state.blog_service.list_params(query.skip, query.limit);
    let posts = state
        .blog_service
        .list(query.published_only, params)
        .await?;
    Ok(Json(posts))
}

/// GET /api/blog/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog_service.get(&id).await?))
}

/// POST /api/blog/posts
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<BlogPostInput>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = state.blog_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/blog/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<BlogPostInput>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog_service.update(&id, input).await?))
}

/// DELETE /api/blog/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.blog_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/blog/posts/tag/{tag}
pub async fn posts_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<TagPostsQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(state.blog_service.list_by_tag(&tag, query.limit).await?))
}

/// GET /api/blog/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, ApiError> {
    Ok(Json(state.blog_service.tag_counts().await?))
}

/// POST /api/blog/seed
pub async fn seed_posts(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = state.blog_service.seed().await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}
