//! Error types for the lingo SDK.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, backend, persistence, and input validation
//! errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for lingo operations.
///
/// This error type covers all possible failure modes in the SDK,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Business errors reported by the backend (non-2xx with a JSON body).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Credential persistence errors.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (invalid host URL, header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the stored credential (401/403) or the request
    /// never completed; the session has been terminated locally.
    #[error("session expired")]
    SessionExpired,

    /// Login or registration was rejected.
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },
}

/// A business error reported by the backend.
///
/// Carries the HTTP status and the `message` field of the JSON error body
/// when one was present. These are never intercepted by the gateway; the
/// typed endpoint layer surfaces them verbatim.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if any.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Credential persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O failed: {message}")]
    Io { message: String },

    /// The stored credential could not be decoded.
    #[error("stored credential is corrupt: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API host URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
