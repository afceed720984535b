//! Public blog: published posts only.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::application::ports::{ApiError, BlogApi};
use crate::application::sequence::{LoadOutcome, RequestSequencer};
use crate::domain::entities::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum BlogView {
    Found(Record),
    NotFound,
    Unavailable,
}

pub struct PublicBlog {
    api: Arc<dyn BlogApi>,
    sequencer: RequestSequencer,
    posts: Mutex<Vec<Record>>,
}

impl PublicBlog {
    pub fn new(api: Arc<dyn BlogApi>) -> Self {
        Self {
            api,
            sequencer: RequestSequencer::new(),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<Record> {
        self.posts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn list_published(&self) -> LoadOutcome {
        let ticket = self.sequencer.issue();
        let result = self.api.list_posts(true).await;
        if let Some(outcome) = LoadOutcome::from_admission(self.sequencer.admit(ticket, "blog")) {
            return outcome;
        }

        let mut posts = self.posts.lock().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(fetched) => {
                *posts = fetched;
                LoadOutcome::Applied { count: posts.len() }
            }
            Err(err) => {
                warn!(error = %err, "failed to load blog posts");
                posts.clear();
                LoadOutcome::Degraded
            }
        }
    }

    pub async fn get(&self, id: i64) -> BlogView {
        match self.api.get_post(id).await {
            Ok(post) => BlogView::Found(post),
            Err(ApiError::NotFound) => BlogView::NotFound,
            Err(err) => {
                warn!(post_id = id, error = %err, "failed to load blog post");
                BlogView::Unavailable
            }
        }
    }

    pub fn detach(&self) {
        self.sequencer.detach();
    }
}
