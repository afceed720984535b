use std::error::Error as StdError;

use thiserror::Error;

use crate::application::auth::AuthError;
use crate::application::ports::ApiError;
use crate::domain::{error::DomainError, schema::ValidationError};
use crate::infra::error::InfraError;

/// Flattened cause chain of an error, for logs and diagnostics output.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn joined(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("{operation} failed")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: ApiError,
    },
}

impl AppError {
    pub fn operation(operation: &'static str, source: ApiError) -> Self {
        Self::OperationFailed { operation, source }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Transport failures and backend rejections read the same to an operator.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::OperationFailed { .. } => "Operation failed",
            AppError::NotFound { .. } => "Not found",
            AppError::Validation(_) | AppError::Domain(DomainError::Validation(_)) => {
                "Please fill in the required fields"
            }
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid username or password",
            AppError::Auth(AuthError::LoginRequired) => "Please log in",
            AppError::Auth(AuthError::LoginInProgress) => "Login already in progress",
            AppError::Domain(DomainError::Schema { .. }) => "Form definition is invalid",
            AppError::Infra(_) => "Client misconfigured",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
