//! Error handling for the SymphonyX client
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for SymphonyX client operations
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("SymphonyX API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("No active session token, log in first")]
    MissingToken,

    #[error("No user profile loaded, log in first")]
    MissingProfile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Transport-level API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out")]
    Timeout,

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("API service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for SymphonyX client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Check if the error is recoverable by retrying the operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Api(api) => api.is_recoverable(),
            ClientError::Config(_) => false,
            ClientError::ConfigLoad(_) => false,
            ClientError::Http(_) => true,
            ClientError::Serialization(_) => false,
            ClientError::Io(_) => true,
            ClientError::UrlParse(_) => false,
            ClientError::Authentication(_) => false,
            ClientError::MissingToken => false,
            ClientError::MissingProfile => false,
            ClientError::InvalidInput(_) => false,
        }
    }
}

impl ApiError {
    /// Check if the error is recoverable by retrying the request
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::RequestFailed(_) => true,
            ApiError::Timeout => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::InvalidResponse(_) => false,
            ApiError::ServiceUnavailable => true,
        }
    }
}
