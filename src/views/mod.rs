//! Presentation state for the reader and author pages
//!
//! Views hold no rendering; they track what a page shows and drive a
//! [`BlogStore`](crate::client::BlogStore) in response to user actions.

pub mod admin;
pub mod form;
pub mod public;


pub use admin::{status_label, AdminBlogView, AdminMode, Confirm, Notice, NoticeKind, SubmitError};
pub use form::{join_tags, parse_tags, FormError, PostForm};
pub use public::{PostMeta, PublicBlogView, PublicState};
