//! Forum views: the public board, a single thread, and admin moderation.
//!
//! Fetch failures degrade to empty collections. Creations and deletions
//! surface as [`AppError`] and leave local collections untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::application::confirm::Confirm;
use crate::application::crud::RemoveOutcome;
use crate::application::error::AppError;
use crate::application::ports::{ApiError, ForumApi};
use crate::application::sequence::{LoadOutcome, RequestSequencer};
use crate::domain::entities::{ForumCategory, ForumPost, ForumPostDetail};
use crate::domain::forum::{CategoryDraft, CategoryFilter, PostDraft, ReplyDraft};

pub const DELETE_POST_PROMPT: &str =
    "Are you sure you want to delete this post and all its replies?";
pub const DELETE_REPLY_PROMPT: &str = "Are you sure you want to delete this reply?";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct BoardState {
    categories: Vec<ForumCategory>,
    posts: Vec<ForumPost>,
    selected: CategoryFilter,
}

/// Public category list plus the (optionally filtered) post list.
pub struct ForumBoard {
    api: Arc<dyn ForumApi>,
    sequencer: RequestSequencer,
    state: Mutex<BoardState>,
}

impl ForumBoard {
    pub fn new(api: Arc<dyn ForumApi>) -> Self {
        Self {
            api,
            sequencer: RequestSequencer::new(),
            state: Mutex::new(BoardState::default()),
        }
    }

    pub fn categories(&self) -> Vec<ForumCategory> {
        lock(&self.state).categories.clone()
    }

    pub fn posts(&self) -> Vec<ForumPost> {
        lock(&self.state).posts.clone()
    }

    pub fn selected(&self) -> CategoryFilter {
        lock(&self.state).selected
    }

    /// Fetches categories and unfiltered posts together; neither is shown
    /// until both have arrived.
    pub async fn load_overview(&self) -> LoadOutcome {
        let ticket = self.sequencer.issue();
        let result = futures::try_join!(
            self.api.list_categories(),
            self.api.list_posts(CategoryFilter::All)
        );
        if let Some(outcome) = LoadOutcome::from_admission(self.sequencer.admit(ticket, "forum"))
        {
            return outcome;
        }

        let mut state = lock(&self.state);
        state.selected = CategoryFilter::All;
        match result {
            Ok((categories, posts)) => {
                let count = posts.len();
                state.categories = categories;
                state.posts = posts;
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                warn!(error = %err, "failed to load forum overview");
                state.categories.clear();
                state.posts.clear();
                LoadOutcome::Degraded
            }
        }
    }

    /// Re-fetches posts filtered server-side; categories stay as loaded.
    pub async fn filter_by_category(&self, filter: CategoryFilter) -> LoadOutcome {
        let ticket = self.sequencer.issue();
        let result = self.api.list_posts(filter).await;
        if let Some(outcome) = LoadOutcome::from_admission(self.sequencer.admit(ticket, "forum"))
        {
            return outcome;
        }

        let mut state = lock(&self.state);
        state.selected = filter;
        match result {
            Ok(posts) => {
                let count = posts.len();
                state.posts = posts;
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                warn!(error = %err, ?filter, "failed to load forum posts");
                state.posts.clear();
                LoadOutcome::Degraded
            }
        }
    }

    /// Validates and publishes a post, then refreshes the current listing.
    pub async fn create_post(&self, draft: PostDraft) -> Result<(), AppError> {
        draft.validate()?;
        self.api
            .create_post(&draft.into_request())
            .await
            .map_err(|err| mutation_failed("create post", err))?;
        info!("forum post created");
        let selected = self.selected();
        self.filter_by_category(selected).await;
        Ok(())
    }

    pub fn detach(&self) {
        self.sequencer.detach();
    }

    pub fn attach(&self) {
        self.sequencer.attach();
    }
}

/// State of a single-post view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadView {
    Found(Box<ForumPostDetail>),
    /// The post does not exist; the view offers a way back to the listing.
    NotFound,
    Unavailable,
}

#[derive(Debug, Default)]
struct ThreadState {
    post_id: Option<i64>,
    view: Option<ThreadView>,
}

pub struct ForumThread {
    api: Arc<dyn ForumApi>,
    sequencer: RequestSequencer,
    state: Mutex<ThreadState>,
}

impl ForumThread {
    pub fn new(api: Arc<dyn ForumApi>) -> Self {
        Self {
            api,
            sequencer: RequestSequencer::new(),
            state: Mutex::new(ThreadState::default()),
        }
    }

    pub fn view(&self) -> Option<ThreadView> {
        lock(&self.state).view.clone()
    }

    /// Fetches the post with its replies, oldest first.
    ///
    /// Returns `None` when the response was discarded as stale or after detach.
    pub async fn load(&self, id: i64) -> Option<ThreadView> {
        let ticket = self.sequencer.issue();
        let result = self.api.get_post(id).await;
        if LoadOutcome::from_admission(self.sequencer.admit(ticket, "forum_thread")).is_some() {
            return None;
        }

        let view = match result {
            Ok(detail) => ThreadView::Found(Box::new(detail)),
            Err(ApiError::NotFound) => ThreadView::NotFound,
            Err(err) => {
                warn!(post_id = id, error = %err, "failed to load forum post");
                ThreadView::Unavailable
            }
        };
        let mut state = lock(&self.state);
        state.post_id = Some(id);
        state.view = Some(view.clone());
        Some(view)
    }

    /// Replies to the loaded post, then reloads the thread.
    pub async fn create_reply(&self, draft: ReplyDraft) -> Result<(), AppError> {
        let post_id = lock(&self.state)
            .post_id
            .ok_or(AppError::not_found("forum post"))?;
        draft.validate()?;
        self.api
            .create_reply(post_id, &draft.into_request())
            .await
            .map_err(|err| mutation_failed("create reply", err))?;
        info!(post_id, "forum reply created");
        self.load(post_id).await;
        Ok(())
    }

    pub fn detach(&self) {
        self.sequencer.detach();
    }

    pub fn attach(&self) {
        self.sequencer.attach();
    }
}

/// Admin view over every post regardless of category.
pub struct ForumModeration {
    api: Arc<dyn ForumApi>,
    sequencer: RequestSequencer,
    posts: Mutex<Vec<ForumPost>>,
}

impl ForumModeration {
    pub fn new(api: Arc<dyn ForumApi>) -> Self {
        Self {
            api,
            sequencer: RequestSequencer::new(),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<ForumPost> {
        lock(&self.posts).clone()
    }

    pub async fn list_all_posts(&self) -> LoadOutcome {
        let ticket = self.sequencer.issue();
        let result = self.api.list_posts(CategoryFilter::All).await;
        if let Some(outcome) =
            LoadOutcome::from_admission(self.sequencer.admit(ticket, "forum_admin"))
        {
            return outcome;
        }

        let mut posts = lock(&self.posts);
        match result {
            Ok(fetched) => {
                *posts = fetched;
                LoadOutcome::Applied { count: posts.len() }
            }
            Err(err) => {
                warn!(error = %err, "failed to load forum posts for moderation");
                posts.clear();
                LoadOutcome::Degraded
            }
        }
    }

    /// Deletes a post together with all of its replies.
    pub async fn delete_post(
        &self,
        id: i64,
        confirm: &dyn Confirm,
    ) -> Result<RemoveOutcome, AppError> {
        if !confirm.confirm(DELETE_POST_PROMPT) {
            return Ok(RemoveOutcome::Cancelled);
        }
        self.api
            .delete_post(id)
            .await
            .map_err(|err| mutation_failed("delete post", err))?;
        info!(post_id = id, "forum post deleted with its replies");
        self.list_all_posts().await;
        Ok(RemoveOutcome::Deleted)
    }

    pub async fn delete_reply(
        &self,
        id: i64,
        confirm: &dyn Confirm,
    ) -> Result<RemoveOutcome, AppError> {
        if !confirm.confirm(DELETE_REPLY_PROMPT) {
            return Ok(RemoveOutcome::Cancelled);
        }
        self.api
            .delete_reply(id)
            .await
            .map_err(|err| mutation_failed("delete reply", err))?;
        info!(reply_id = id, "forum reply deleted");
        self.list_all_posts().await;
        Ok(RemoveOutcome::Deleted)
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<(), AppError> {
        draft.validate()?;
        self.api
            .create_category(&draft.into_request())
            .await
            .map_err(|err| mutation_failed("create category", err))?;
        info!("forum category created");
        Ok(())
    }

    pub async fn categories(&self) -> Vec<ForumCategory> {
        match self.api.list_categories().await {
            Ok(categories) => categories,
            Err(err) => {
                warn!(error = %err, "failed to load forum categories");
                Vec::new()
            }
        }
    }

    pub fn detach(&self) {
        self.sequencer.detach();
    }

    pub fn attach(&self) {
        self.sequencer.attach();
    }
}

fn mutation_failed(operation: &'static str, err: ApiError) -> AppError {
    warn!(operation, error = %err, "forum mutation failed");
    AppError::operation(operation, err)
}
