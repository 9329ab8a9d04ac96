//! Provider capability traits.
//!
//! These are the only two operations the binding core relies on. How a
//! provider validates a ticket or evaluates a policy is its own business.

use async_trait::async_trait;

use crate::error::{AuthenticationError, AuthorizationError};
use crate::models::{AuthorizationDecision, Principal, RequestMetadata};

/// SSO authentication provider.
///
/// Registered in the [`ServiceRegistry`](crate::ServiceRegistry) under a
/// unique name and shared by every deployment that names it:
///
/// ```ignore
/// let authn = registry.authentication("cas-prod").ok_or(...)?;
///
/// let principal = authn.authenticate(&request).await?;
/// ```
#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// Authenticate an incoming request and return the validated principal.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the request carries no valid credentials
    /// - `ServiceUnavailable` if the identity provider cannot be reached
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        request: &RequestMetadata,
    ) -> Result<Principal, AuthenticationError>;
}

/// Authorization provider.
///
/// Access denial is expressed via [`AuthorizationDecision::permitted`],
/// not as an error.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Decide whether `principal` may access the resource named by `request`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the policy source cannot be reached
    /// - `Internal` for unexpected errors
    async fn authorize(
        &self,
        principal: &Principal,
        request: &RequestMetadata,
    ) -> Result<AuthorizationDecision, AuthorizationError>;
}
