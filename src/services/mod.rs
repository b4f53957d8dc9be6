//! Services layer - Business logic
//!
//! Services implement the blog store rules on top of the repositories:
//! validation, not-found semantics and aggregation.

pub mod blog;
pub mod seed;

pub use blog::{BlogService, BlogServiceError, SeedOutcome};
