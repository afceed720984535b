use async_trait::async_trait;
use clubsite_api_types::{
    ForumCategoryCreateRequest, ForumPostCreateRequest, ForumReplyCreateRequest,
};
use reqwest::Method;

use crate::application::ports::{ApiError, ForumApi};
use crate::domain::entities::{ForumCategory, ForumPost, ForumPostDetail};
use crate::domain::forum::CategoryFilter;

use super::{RestClient, to_body};

#[async_trait]
impl ForumApi for RestClient {
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, ApiError> {
        self.request(Method::GET, "forum/categories", &[], None)
            .await
    }

    async fn create_category(
        &self,
        request: &ForumCategoryCreateRequest,
    ) -> Result<(), ApiError> {
        let body = to_body(request)?;
        self.request_unit(Method::POST, "forum/categories", Some(&body))
            .await
    }

    async fn list_posts(&self, filter: CategoryFilter) -> Result<Vec<ForumPost>, ApiError> {
        let query: Vec<(&str, String)> = filter
            .category_id()
            .map(|id| ("category_id", id.to_string()))
            .into_iter()
            .collect();
        self.request(Method::GET, "forum/posts", &query, None).await
    }

    async fn get_post(&self, id: i64) -> Result<ForumPostDetail, ApiError> {
        let path = format!("forum/posts/{id}");
        self.request(Method::GET, &path, &[], None).await
    }

    async fn create_post(&self, request: &ForumPostCreateRequest) -> Result<(), ApiError> {
        let body = to_body(request)?;
        self.request_unit(Method::POST, "forum/posts", Some(&body))
            .await
    }

    async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("forum/posts/{id}");
        self.request_unit(Method::DELETE, &path, None).await
    }

    async fn create_reply(
        &self,
        post_id: i64,
        request: &ForumReplyCreateRequest,
    ) -> Result<(), ApiError> {
        let body = to_body(request)?;
        let path = format!("forum/posts/{post_id}/replies");
        self.request_unit(Method::POST, &path, Some(&body)).await
    }

    async fn delete_reply(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("forum/replies/{id}");
        self.request_unit(Method::DELETE, &path, None).await
    }
}
