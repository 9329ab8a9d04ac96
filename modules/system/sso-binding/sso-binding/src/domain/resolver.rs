//! Provider resolution against the service registry.
//!
//! Every call is a single exact-match lookup; nothing is cached or retried.

use std::sync::Arc;

use sso_binding_sdk::{AuthenticationService, AuthorizationService, ProviderKind, ServiceLookup};

use super::error::ProviderNotFoundError;

/// Look up the authentication provider registered as `id`.
///
/// # Errors
///
/// Returns [`ProviderNotFoundError`] with kind `Authentication` if `id` is not registered.
pub fn resolve_authentication(
    registry: &dyn ServiceLookup,
    id: &str,
) -> Result<Arc<dyn AuthenticationService>, ProviderNotFoundError> {
    registry
        .authentication(id)
        .ok_or_else(|| ProviderNotFoundError::new(ProviderKind::Authentication, id))
}

/// Look up the authorization provider registered as `id`.
///
/// # Errors
///
/// Returns [`ProviderNotFoundError`] with kind `Authorization` if `id` is not registered.
pub fn resolve_authorization(
    registry: &dyn ServiceLookup,
    id: &str,
) -> Result<Arc<dyn AuthorizationService>, ProviderNotFoundError> {
    registry
        .authorization(id)
        .ok_or_else(|| ProviderNotFoundError::new(ProviderKind::Authorization, id))
}
