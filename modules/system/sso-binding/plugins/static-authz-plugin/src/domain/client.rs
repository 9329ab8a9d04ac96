//! `AuthorizationService` implementation for the static plugin.

use async_trait::async_trait;
use sso_binding_sdk::{
    AuthorizationDecision, AuthorizationError, AuthorizationService, Principal, RequestMetadata,
};

use super::service::Service;

#[async_trait]
impl AuthorizationService for Service {
    async fn authorize(
        &self,
        principal: &Principal,
        request: &RequestMetadata,
    ) -> Result<AuthorizationDecision, AuthorizationError> {
        Ok(self.evaluate(principal, request))
    }
}
