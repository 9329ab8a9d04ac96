//! Error types for provider calls.

use thiserror::Error;

/// Errors returned by an [`AuthenticationService`](crate::AuthenticationService).
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// Credentials are missing, invalid, or expired.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The identity provider is not reachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors returned by an [`AuthorizationService`](crate::AuthorizationService).
///
/// These represent infrastructure failures only.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The policy source is not reachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
