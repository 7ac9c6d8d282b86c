//! Error shapes shared by every caller of the portal API
//!
//! A call against the backend ends in one of three ways besides success:
//! the response does not match its contract, the backend answered with an
//! envelope saying `success = false`, or the backend could not be reached.
//! This module defines the types that keep those three apart.

use std::fmt;

use thiserror::Error;

/// Category of a failed API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Decoded response is missing a field, carries an unknown one, or holds
    /// a value outside its enumerated domain
    ContractViolation,
    /// Backend answered with `success = false`
    Application,
    /// Network failure or non-2xx response without a parseable envelope
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractViolation => write!(f, "contract violation"),
            Self::Application => write!(f, "application failure"),
            Self::Transport => write!(f, "transport failure"),
        }
    }
}

/// Failure reported by the backend through the response envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApplicationFailure {
    /// Human readable message from the envelope
    pub message: String,
    /// Envelope timestamp, when one was present
    pub timestamp: Option<String>,
}

impl ApplicationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: None,
        }
    }
}

/// Response that does not satisfy its type contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Contract violation on {context}: {detail}")]
pub struct ContractViolation {
    /// What was being decoded (usually the route path)
    pub context: String,
    /// Decoder message
    pub detail: String,
}

impl ContractViolation {
    pub fn new(context: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self {
            context: context.into(),
            detail: detail.to_string(),
        }
    }
}

/// Request rejected before it is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending request field (wire name)
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Type alias for Result with ValidationError
pub type ValidationResult = Result<(), ValidationError>;
