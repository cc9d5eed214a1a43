// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures a people-directory use case can report. Handlers turn
/// `Unauthorized` into a sign-in redirect and `Forbidden` into a plain
/// redirect; the rest become HTTP errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("sign in required: {0}")]
    Unauthorized(String),

    #[error("not permitted: {0}")]
    Forbidden(String),

    /// The object-store backend failed or answered with garbage.
    #[error("backend failure: {0}")]
    Backend(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Backend(msg),
        }
    }
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Infrastructure(_))
    }
}
