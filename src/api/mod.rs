//! API layer - HTTP handlers and routing
//!
//! - Blog store endpoints under `/api/blog`
//! - Service info and health under `/api`

pub mod blog;
pub mod middleware;
pub mod responses;
pub mod site;


use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use middleware::{cors_layer, ApiError, AppState};

/// Build the API routes, all under the `/api` prefix
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/api", get(site::api_info))
        .route("/api/", get(site::api_info))
        .route("/api/health", get(site::health))
        .nest("/api/blog", blog::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = cors_layer(cors_origin)?;

    Ok(build_api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
