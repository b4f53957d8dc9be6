//! Public reader view: post list, featured post, detail overlay.

use crate::client::BlogStore;
use crate::models::BlogPost;

/// What the public blog page is showing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PublicState {
    /// Initial list fetch in flight
    #[default]
    Loading,
    /// List shown; an empty list renders the empty state
    Loaded(Vec<BlogPost>),
    /// List shown with one post open in detail
    Viewing { posts: Vec<BlogPost>, post: BlogPost },
}

/// The date and reading-time line under a post's title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    pub date: String,
    pub read_time: String,
}

impl PostMeta {
    pub fn of(post: &BlogPost) -> Self {
        Self {
            date: post.display_date(),
            read_time: post.read_time.clone(),
        }
    }
}

/// Reader-facing blog view
///
/// Fetch failures are logged and otherwise swallowed: a failed list fetch
/// renders like an empty blog, a failed detail fetch leaves the view as it was.
#[derive(Debug, Default)]
pub struct PublicBlogView {
    state: PublicState,
}

impl PublicBlogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PublicState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PublicState::Loading)
    }

    /// Fetch the published list, replacing whatever was shown
    pub async fn load(&mut self, store: &dyn BlogStore) {
        self.state = PublicState::Loading;
        let posts = match store.list(true).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!(error = %e, "Error loading blog posts");
                Vec::new()
            }
        };
        self.state = PublicState::Loaded(posts);
    }

    /// Fetch a post and open it in detail
    pub async fn open(&mut self, store: &dyn BlogStore, id: &str) {
        match store.get(id).await {
            Ok(post) => {
                let posts = self.take_posts();
                self.state = PublicState::Viewing { posts, post };
            }
            Err(e) => {
                // TODO: surface detail fetch failures to the reader once the page has an error slot
                tracing::error!(error = %e, id = %id, "Error loading blog post");
            }
        }
    }

    /// Close the detail overlay, discarding the fetched post
    pub fn close(&mut self) {
        if let PublicState::Viewing { .. } = self.state {
            let posts = self.take_posts();
            self.state = PublicState::Loaded(posts);
        }
    }

    /// Posts in list order
    pub fn posts(&self) -> &[BlogPost] {
        match &self.state {
            PublicState::Loading => &[],
            PublicState::Loaded(posts) | PublicState::Viewing { posts, .. } => posts,
        }
    }

    /// The first post, rendered with emphasis
    pub fn featured(&self) -> Option<&BlogPost> {
        self.posts().first()
    }

    /// Every post after the featured one
    pub fn grid(&self) -> &[BlogPost] {
        self.posts().get(1..).unwrap_or(&[])
    }

    /// Loaded with nothing to show
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.posts().is_empty()
    }

    /// The post open in detail
    pub fn selected(&self) -> Option<&BlogPost> {
        match &self.state {
            PublicState::Viewing { post, .. } => Some(post),
            _ => None,
        }
    }

    /// Meta line of the featured post
    pub fn featured_meta(&self) -> Option<PostMeta> {
        self.featured().map(PostMeta::of)
    }

    /// Meta line of the post open in detail
    pub fn selected_meta(&self) -> Option<PostMeta> {
        self.selected().map(PostMeta::of)
    }

    fn take_posts(&mut self) -> Vec<BlogPost> {
        match std::mem::take(&mut self.state) {
            PublicState::Loading => Vec::new(),
            PublicState::Loaded(posts) | PublicState::Viewing { posts, .. } => posts,
        }
    }
}
