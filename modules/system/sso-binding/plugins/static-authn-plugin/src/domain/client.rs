//! `AuthenticationService` implementation for the static plugin.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sso_binding_sdk::{AuthenticationError, AuthenticationService, Principal, RequestMetadata};

use super::service::Service;

#[async_trait]
impl AuthenticationService for Service {
    async fn authenticate(
        &self,
        request: &RequestMetadata,
    ) -> Result<Principal, AuthenticationError> {
        let token = request
            .bearer_token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .ok_or_else(|| AuthenticationError::Unauthenticated("missing token".to_owned()))?;

        self.authenticate(token)
            .ok_or_else(|| AuthenticationError::Unauthenticated("invalid token".to_owned()))
    }
}
