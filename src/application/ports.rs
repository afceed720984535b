//! Port traits describing the REST backend this client consumes.

use async_trait::async_trait;
use clubsite_api_types::{
    ChangePasswordRequest, ForumCategoryCreateRequest, ForumPostCreateRequest,
    ForumReplyCreateRequest, LoginRequest, LoginResponse, SessionStatus,
};
use thiserror::Error;

use crate::domain::entities::{ForumCategory, ForumPost, ForumPostDetail, Record};
use crate::domain::forum::CategoryFilter;
use crate::domain::schema::EditBuffer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("resource not found")]
    NotFound,
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }
}

/// List/create/update/delete for one generic resource type.
///
/// Mutations return nothing; callers re-list instead of trusting an inline
/// response body.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Record>, ApiError>;

    async fn create(&self, payload: &EditBuffer) -> Result<(), ApiError>;

    async fn update(&self, id: i64, payload: &EditBuffer) -> Result<(), ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ForumApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, ApiError>;

    async fn create_category(&self, request: &ForumCategoryCreateRequest)
    -> Result<(), ApiError>;

    async fn list_posts(&self, filter: CategoryFilter) -> Result<Vec<ForumPost>, ApiError>;

    async fn get_post(&self, id: i64) -> Result<ForumPostDetail, ApiError>;

    async fn create_post(&self, request: &ForumPostCreateRequest) -> Result<(), ApiError>;

    /// Removes the post and, on the backend, every reply attached to it.
    async fn delete_post(&self, id: i64) -> Result<(), ApiError>;

    async fn create_reply(
        &self,
        post_id: i64,
        request: &ForumReplyCreateRequest,
    ) -> Result<(), ApiError>;

    async fn delete_reply(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn check(&self) -> Result<SessionStatus, ApiError>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError>;
}

#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn list_posts(&self, published_only: bool) -> Result<Vec<Record>, ApiError>;

    async fn get_post(&self, id: i64) -> Result<Record, ApiError>;
}

#[async_trait]
pub trait MaintenanceApi: Send + Sync {
    /// Populates sample data. Not idempotent; never retried blindly.
    async fn seed(&self) -> Result<(), ApiError>;
}
