//! The per-deployment request extension.

use std::sync::Arc;

use sso_binding_sdk::{
    AuthenticationError, AuthenticationService, AuthorizationError, AuthorizationService,
    Principal, RequestMetadata,
};
use thiserror::Error;

/// Why a request was turned away.
#[derive(Error, Debug)]
pub enum RequestRejection {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("access denied")]
    Forbidden { reason: Option<String> },

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthenticationError> for RequestRejection {
    fn from(e: AuthenticationError) -> Self {
        match e {
            AuthenticationError::Unauthenticated(msg) => Self::Unauthenticated(msg),
            AuthenticationError::ServiceUnavailable(msg) => Self::Unavailable(msg),
            AuthenticationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<AuthorizationError> for RequestRejection {
    fn from(e: AuthorizationError) -> Self {
        match e {
            AuthorizationError::ServiceUnavailable(msg) => Self::Unavailable(msg),
            AuthorizationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

/// Request-processing unit bound to exactly one authentication and one
/// authorization provider for the lifetime of a deployment.
///
/// Providers are held by reference, not by name: re-registering a name in
/// the registry does not affect an extension that is already built.
pub struct RequestExtension {
    deployment: String,
    authentication: Arc<dyn AuthenticationService>,
    authorization: Arc<dyn AuthorizationService>,
}

/// Bind two resolved providers into a [`RequestExtension`].
#[must_use]
pub fn build(
    deployment: impl Into<String>,
    authentication: Arc<dyn AuthenticationService>,
    authorization: Arc<dyn AuthorizationService>,
) -> RequestExtension {
    RequestExtension {
        deployment: deployment.into(),
        authentication,
        authorization,
    }
}

impl RequestExtension {
    /// Name of the deployment this extension was built for.
    #[must_use]
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    #[must_use]
    pub fn authentication(&self) -> &Arc<dyn AuthenticationService> {
        &self.authentication
    }

    #[must_use]
    pub fn authorization(&self) -> &Arc<dyn AuthorizationService> {
        &self.authorization
    }

    /// Authenticate, then authorize, one incoming request.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the authentication provider rejects the credentials
    /// - `Forbidden` if the authorization provider denies access
    /// - `Unavailable` / `Internal` if either provider fails
    #[tracing::instrument(skip_all, fields(deployment = %self.deployment, path = %request.path))]
    pub async fn process(&self, request: &RequestMetadata) -> Result<Principal, RequestRejection> {
        let principal = self.authentication.authenticate(request).await?;
        let decision = self.authorization.authorize(&principal, request).await?;

        if decision.permitted {
            Ok(principal)
        } else {
            Err(RequestRejection::Forbidden {
                reason: decision.deny_reason,
            })
        }
    }
}

impl std::fmt::Debug for RequestExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExtension")
            .field("deployment", &self.deployment)
            .finish_non_exhaustive()
    }
}
