//! Custom error types for the portal client

use common::error::{ApplicationFailure, ContractViolation, ErrorKind, ValidationError};
use common::models::EnvelopeError;
use thiserror::Error;

/// Custom error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request never got an HTTP answer (connection, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer without a parseable envelope
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend answered with `success = false`
    #[error("{0}")]
    Application(#[from] ApplicationFailure),

    /// Response did not match its contract
    #[error("{0}")]
    Contract(#[from] ContractViolation),

    /// Backend rejected the bearer token; the session has been cleared
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// Request rejected before sending
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Session storage failure
    #[error("Session store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Which of the three API failure kinds this is, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Transport(_) | Self::Status { .. } | Self::SessionExpired => {
                Some(ErrorKind::Transport)
            }
            Self::Application(_) => Some(ErrorKind::Application),
            Self::Contract(_) => Some(ErrorKind::ContractViolation),
            Self::Validation(_) | Self::Store(_) | Self::Config(_) => None,
        }
    }

    /// Message of an application failure
    pub fn application_message(&self) -> Option<&str> {
        match self {
            Self::Application(failure) => Some(&failure.message),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Application(failure) => Self::Application(failure),
            EnvelopeError::Contract(violation) => Self::Contract(violation),
        }
    }
}

impl From<redis::RedisError> for ClientError {
    fn from(err: redis::RedisError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
