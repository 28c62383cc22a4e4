use thiserror::Error;

use shared_models::error::AppError;

/// Caller-supplied input failed a precondition. Raised before any MIS call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("MIS request {operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{0}")]
    Business(String),

    #[error("{0}")]
    NotFound(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(e) => AppError::ValidationError(e.0),
            GatewayError::Transport { message, .. } => AppError::Internal(message),
            GatewayError::Business(message) => AppError::Internal(message),
            GatewayError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateCodecError {
    #[error("not a MIS date literal: '{0}'")]
    Malformed(String),

    #[error("MIS date out of range: '{0}'")]
    OutOfRange(String),
}
