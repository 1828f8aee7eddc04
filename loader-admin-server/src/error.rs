//! Error types for the loader admin server.
//!
//! This module provides a unified error type for all server operations,
//! with conversions from the underlying library errors and a mapping onto
//! the JSON error envelope returned to HTTP clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message returned when the login body lacks a username or password.
pub const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Message returned for an unknown user or a wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// The main error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors (missing values, invalid format)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store errors (connectivity, queries, decoding)
    #[error("Database error: {0}")]
    Database(String),

    /// The request body could not be interpreted
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Login attempted without both a username and a password
    #[error("Username and password are required")]
    MissingCredentials,

    /// Unknown user or wrong password; the two are not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token signing failures
    #[error("Token error: {0}")]
    Token(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create a config error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a database error with a message.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a bad request error with a message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an unauthorized error with a message.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create an internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Config(_) | Self::Database(_) | Self::Token(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed to the client. Server-side failures are not echoed.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Unauthorized(msg) => msg.clone(),
            Self::MissingCredentials => MISSING_CREDENTIALS.to_string(),
            Self::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            _ => String::from("Internal server error"),
        }
    }
}

/// JSON error envelope: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

// Conversion from anyhow::Error for compatibility
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<mongodb::error::Error> for ServerError {
    fn from(err: mongodb::error::Error) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ServerError::Token(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("Background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            ServerError::MissingCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::bad_request("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::unauthorized("Invalid token").status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ServerError::database("connection refused on 10.0.0.3:27017");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            ServerError::MissingCredentials.public_message(),
            "Username and password are required"
        );
        assert_eq!(
            ServerError::InvalidCredentials.public_message(),
            "Invalid credentials"
        );
    }

    #[tokio::test]
    async fn test_into_response_uses_error_envelope() {
        let response = ServerError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Invalid credentials" }));
    }
}
