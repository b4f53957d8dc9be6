//! Admin editor view: list of all posts, create/edit form, delete.

use crate::client::{BlogStore, StoreError};
use crate::models::BlogPost;

use super::form::{FormError, PostForm};

/// Which editor pane is open
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdminMode {
    #[default]
    Idle,
    Creating(PostForm),
    Editing { post: BlogPost, form: PostForm },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn error(description: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            description: description.to_string(),
        }
    }
}

/// Asks the author to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Badge shown next to each post in the admin list
pub fn status_label(post: &BlogPost) -> &'static str {
    if post.is_draft() {
        "Draft"
    } else {
        "Published"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("No post is being edited")]
    NoForm,
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Author-facing view over every post, drafts included
#[derive(Debug)]
pub struct AdminBlogView {
    posts: Vec<BlogPost>,
    loading: bool,
    mode: AdminMode,
    notices: Vec<Notice>,
}

impl Default for AdminBlogView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminBlogView {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
            mode: AdminMode::Idle,
            notices: Vec::new(),
        }
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> &AdminMode {
        &self.mode
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices once shown
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetch all posts, published or not
    ///
    /// On failure the previous list stays and an error notice is raised.
    pub async fn load(&mut self, store: &dyn BlogStore) {
        self.loading = true;
        match store.list(false).await {
            Ok(posts) => self.posts = posts,
            Err(e) => {
                tracing::error!(error = %e, "Error loading blog posts");
                self.notices.push(Notice::error("Failed to load blog posts"));
            }
        }
        self.loading = false;
    }

    /// Open an empty form
    pub fn begin_create(&mut self) {
        self.mode = AdminMode::Creating(PostForm::default());
    }

    /// Open the form pre-filled from `post`
    pub fn begin_edit(&mut self, post: &BlogPost) {
        self.mode = AdminMode::Editing {
            post: post.clone(),
            form: PostForm::from_post(post),
        };
    }

    /// Close the form, discarding its contents
    pub fn cancel(&mut self) {
        self.mode = AdminMode::Idle;
    }

    pub fn form(&self) -> Option<&PostForm> {
        match &self.mode {
            AdminMode::Idle => None,
            AdminMode::Creating(form) | AdminMode::Editing { form, .. } => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        match &mut self.mode {
            AdminMode::Idle => None,
            AdminMode::Creating(form) | AdminMode::Editing { form, .. } => Some(form),
        }
    }

    /// Save the open form
    ///
    /// Invalid forms never reach the store. On success the form closes and the
    /// list reloads; on store failure the form stays open with its contents.
    pub async fn submit(&mut self, store: &dyn BlogStore) -> Result<BlogPost, SubmitError> {
        let (editing_id, input) = match &self.mode {
            AdminMode::Idle => return Err(SubmitError::NoForm),
            AdminMode::Creating(form) => (None, form.to_input()?),
            AdminMode::Editing { post, form } => (Some(post.id.clone()), form.to_input()?),
        };

        let result = match &editing_id {
            Some(id) => store.update(id, &input).await,
            None => store.create(&input).await,
        };

        match result {
            Ok(post) => {
                let notice = match editing_id {
                    Some(_) => Notice::success("Success", "Blog post updated successfully"),
                    None => Notice::success("Success", "Blog post created successfully"),
                };
                self.notices.push(notice);
                self.mode = AdminMode::Idle;
                self.load(store).await;
                Ok(post)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving blog post");
                let description = match editing_id {
                    Some(_) => "Failed to update blog post",
                    None => "Failed to create blog post",
                };
                self.notices.push(Notice::error(description));
                Err(e.into())
            }
        }
    }

    /// Delete a post after the author confirms
    ///
    /// Returns `Ok(false)` when the author declines; no request is made then.
    /// Deleting the post open in the editor also closes the editor.
    pub async fn delete(
        &mut self,
        store: &dyn BlogStore,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<bool, StoreError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        match store.delete(id).await {
            Ok(()) => {
                if matches!(&self.mode, AdminMode::Editing { post, .. } if post.id == id) {
                    self.mode = AdminMode::Idle;
                }
                self.notices
                    .push(Notice::success("Success", "Blog post deleted successfully"));
                self.load(store).await;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "Error deleting blog post");
                self.notices.push(Notice::error("Failed to delete blog post"));
                Err(e)
            }
        }
    }
}
