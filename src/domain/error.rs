use thiserror::Error;

use crate::domain::schema::ValidationError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("field schema is malformed: {message}")]
    Schema { message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}
