use async_trait::async_trait;
use clubsite_api_types::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionStatus};
use reqwest::Method;

use crate::application::ports::{ApiError, AuthApi};

use super::{RestClient, to_body};

const UNAUTHORIZED: u16 = 401;

#[async_trait]
impl AuthApi for RestClient {
    /// A 401 carries the backend's `{success: false}` body and is not a transport problem.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = to_body(request)?;
        match self
            .request::<LoginResponse>(Method::POST, "auth/login", &[], Some(&body))
            .await
        {
            Err(ApiError::Rejected {
                status: UNAUTHORIZED,
                body,
            }) => Ok(serde_json::from_str(&body).unwrap_or_default()),
            other => other,
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.request_unit(Method::POST, "auth/logout", None).await
    }

    async fn check(&self) -> Result<SessionStatus, ApiError> {
        match self
            .request::<SessionStatus>(Method::GET, "auth/check", &[], None)
            .await
        {
            Err(ApiError::Rejected {
                status: UNAUTHORIZED,
                ..
            }) => Ok(SessionStatus {
                authenticated: false,
            }),
            other => other,
        }
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        let body = to_body(request)?;
        self.request_unit(Method::POST, "auth/change-password", Some(&body))
            .await
    }
}
