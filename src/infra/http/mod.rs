//! REST adapter for the club backend.
//!
//! One [`RestClient`] holds the cookie jar, so the session set by
//! `auth/login` rides along on every later call made through it or its
//! per-resource handles.

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::application::binding::ResourceKind;
use crate::application::ports::ApiError;
use crate::config::ApiSettings;
use crate::infra::error::InfraError;

mod auth;
mod content;
mod forum;

#[cfg(test)]
mod tests;

pub use content::HttpResourceApi;

type Query<'a> = &'a [(&'a str, String)];

#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base: Url,
}

impl RestClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .cookie_store(true)
            .timeout(settings.timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self {
            client,
            base: settings.base_url.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("clubsite/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Handle for one generic resource, sharing this client's session.
    pub fn resource(&self, kind: ResourceKind) -> HttpResourceApi {
        HttpResourceApi::new(self.clone(), kind)
    }

    fn url(&self, path: &str, query: Query<'_>) -> Result<Url, ApiError> {
        let mut url = self.base.join(path).map_err(ApiError::transport)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path, query)?;
        metrics::counter!("clubsite_api_requests_total", "method" => method.to_string())
            .increment(1);
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = async {
            let response = request.send().await.map_err(ApiError::transport)?;
            let status = response.status();
            let bytes = response.bytes().await.map_err(ApiError::transport)?;
            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound);
            }
            if !status.is_success() {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                return Err(ApiError::rejected(status.as_u16(), text));
            }
            Ok(bytes.to_vec())
        }
        .await;

        if let Err(err) = &result {
            metrics::counter!("clubsite_api_failures_total", "method" => method.to_string())
                .increment(1);
            debug!(%method, path, error = %err, "request failed");
        }
        result
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let bytes = self.execute(method, path, query, body).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::decode)
    }

    /// Ignores any response body; callers re-fetch instead.
    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, &[], body).await.map(|_| ())
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::decode)
}
