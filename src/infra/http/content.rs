use async_trait::async_trait;
use reqwest::Method;

use crate::application::binding::ResourceKind;
use crate::application::ports::{ApiError, BlogApi, MaintenanceApi, ResourceApi};
use crate::domain::entities::Record;
use crate::domain::schema::EditBuffer;

use super::RestClient;

/// Uniform `/{resource}` and `/{resource}/{id}` endpoints for one kind.
#[derive(Clone, Debug)]
pub struct HttpResourceApi {
    client: RestClient,
    kind: ResourceKind,
}

impl HttpResourceApi {
    pub fn new(client: RestClient, kind: ResourceKind) -> Self {
        Self { client, kind }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.kind.path())
    }
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn list(&self) -> Result<Vec<Record>, ApiError> {
        let query: Vec<(&str, String)> = self
            .kind
            .admin_list_query()
            .map(|(key, value)| (key, value.to_string()))
            .into_iter()
            .collect();
        self.client
            .request(Method::GET, self.kind.path(), &query, None)
            .await
    }

    async fn create(&self, payload: &EditBuffer) -> Result<(), ApiError> {
        self.client
            .request_unit(Method::POST, self.kind.path(), Some(&payload.to_payload()))
            .await
    }

    async fn update(&self, id: i64, payload: &EditBuffer) -> Result<(), ApiError> {
        self.client
            .request_unit(Method::PUT, &self.item_path(id), Some(&payload.to_payload()))
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .request_unit(Method::DELETE, &self.item_path(id), None)
            .await
    }
}

#[async_trait]
impl BlogApi for RestClient {
    async fn list_posts(&self, published_only: bool) -> Result<Vec<Record>, ApiError> {
        self.request(
            Method::GET,
            ResourceKind::Blog.path(),
            &[("published", published_only.to_string())],
            None,
        )
        .await
    }

    async fn get_post(&self, id: i64) -> Result<Record, ApiError> {
        let path = format!("{}/{id}", ResourceKind::Blog.path());
        self.request(Method::GET, &path, &[], None).await
    }
}

#[async_trait]
impl MaintenanceApi for RestClient {
    async fn seed(&self) -> Result<(), ApiError> {
        self.request_unit(Method::POST, "seed", None).await
    }
}
