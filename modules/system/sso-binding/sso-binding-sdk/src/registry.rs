//! Name-keyed directory of live provider instances.
//!
//! The hosting environment populates and tears down the registry; the binding
//! core consumes it read-only through [`ServiceLookup`]. Authentication and
//! authorization providers live in two independent namespaces, so the same
//! name may be registered once in each.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::api::{AuthenticationService, AuthorizationService};

/// The capability namespace a provider name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Authentication,
    Authorization,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only lookup capability over a provider directory.
///
/// Lookups are exact-match on the registered name. Implementations must be
/// safe to call from any number of threads at once.
pub trait ServiceLookup: Send + Sync {
    /// Find the authentication provider registered as `name`.
    fn authentication(&self, name: &str) -> Option<Arc<dyn AuthenticationService>>;

    /// Find the authorization provider registered as `name`.
    fn authorization(&self, name: &str) -> Option<Arc<dyn AuthorizationService>>;
}

/// Concurrent in-process provider registry.
///
/// Readers never block each other and may run alongside registrations and
/// deregistrations.
#[derive(Default)]
pub struct ServiceRegistry {
    authentication: DashMap<String, Arc<dyn AuthenticationService>>,
    authorization: DashMap<String, Arc<dyn AuthorizationService>>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an authentication provider under `name`.
    ///
    /// Returns the instance previously registered under that name, if any.
    pub fn register_authentication(
        &self,
        name: impl Into<String>,
        service: Arc<dyn AuthenticationService>,
    ) -> Option<Arc<dyn AuthenticationService>> {
        let name = name.into();
        tracing::debug!(kind = %ProviderKind::Authentication, name = %name, "Registering provider");
        self.authentication.insert(name, service)
    }

    /// Publish an authorization provider under `name`.
    ///
    /// Returns the instance previously registered under that name, if any.
    pub fn register_authorization(
        &self,
        name: impl Into<String>,
        service: Arc<dyn AuthorizationService>,
    ) -> Option<Arc<dyn AuthorizationService>> {
        let name = name.into();
        tracing::debug!(kind = %ProviderKind::Authorization, name = %name, "Registering provider");
        self.authorization.insert(name, service)
    }

    /// Remove the authentication provider registered as `name`.
    pub fn deregister_authentication(&self, name: &str) -> Option<Arc<dyn AuthenticationService>> {
        self.authentication.remove(name).map(|(_, svc)| svc)
    }

    /// Remove the authorization provider registered as `name`.
    pub fn deregister_authorization(&self, name: &str) -> Option<Arc<dyn AuthorizationService>> {
        self.authorization.remove(name).map(|(_, svc)| svc)
    }

    /// Number of registered providers of the given kind.
    #[must_use]
    pub fn len(&self, kind: ProviderKind) -> usize {
        match kind {
            ProviderKind::Authentication => self.authentication.len(),
            ProviderKind::Authorization => self.authorization.len(),
        }
    }
}

impl ServiceLookup for ServiceRegistry {
    fn authentication(&self, name: &str) -> Option<Arc<dyn AuthenticationService>> {
        self.authentication
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn authorization(&self, name: &str) -> Option<Arc<dyn AuthorizationService>> {
        self.authorization
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }
}
