//! Request-time models exchanged with providers.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// What a provider gets to see of an incoming request.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method, upper-case (e.g. `GET`).
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// Bearer credential presented by the client, if any.
    /// Wrapped in `SecretString` so `Debug` redacts the value.
    pub bearer_token: Option<SecretString>,
}

impl RequestMetadata {
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(SecretString::from(token.into()));
        self
    }
}

/// An authenticated identity produced by an [`AuthenticationService`](crate::AuthenticationService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Subject name as asserted by the identity provider.
    subject: String,
    /// Roles granted to the subject.
    #[serde(default)]
    roles: Vec<String>,
}

impl Principal {
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether the principal holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    /// Whether access is granted.
    pub permitted: bool,
    /// Reason for denial (present when `permitted` is `false`).
    pub deny_reason: Option<String>,
}

impl AuthorizationDecision {
    #[must_use]
    pub fn permit() -> Self {
        Self {
            permitted: true,
            deny_reason: None,
        }
    }

    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            permitted: false,
            deny_reason: Some(reason.into()),
        }
    }
}
