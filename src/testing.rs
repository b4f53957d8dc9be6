//! Test fixtures shared across modules.

use std::sync::Arc;

use crate::api::{build_router, AppState};
use crate::client::HttpBlogClient;
use crate::config::{BlogConfig, ClientConfig};
use crate::db::repositories::SqlxBlogPostRepository;
use crate::db::{create_test_pool, migrations};
use crate::services::BlogService;

/// A migrated in-memory store
pub async fn memory_service() -> Arc<BlogService> {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    Arc::new(BlogService::new(
        SqlxBlogPostRepository::boxed(pool),
        BlogConfig::default(),
    ))
}

/// Serve a fresh in-memory store on an ephemeral port and return a client for it
pub async fn spawn_store() -> HttpBlogClient {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    let blog_service = Arc::new(BlogService::new(
        SqlxBlogPostRepository::boxed(pool.clone()),
        BlogConfig::default(),
    ));
    let app = build_router(AppState { pool, blog_service }, "*").expect("Failed to build router");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    HttpBlogClient::new(&ClientConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: Some(10),
    })
    .expect("Failed to build client")
}
