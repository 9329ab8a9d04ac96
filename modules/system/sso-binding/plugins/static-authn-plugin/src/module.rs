//! Registration of the static authentication provider.

use std::sync::Arc;

use sso_binding_sdk::{AuthenticationService, ServiceRegistry};
use tracing::{info, warn};

use crate::config::{AuthNMode, StaticAuthNPluginConfig};
use crate::domain::Service;

/// Build a [`Service`] from `cfg` and publish it in `registry` under `name`.
///
/// A provider already registered under `name` is replaced.
#[allow(clippy::must_use_candidate)] // registration is the side effect
pub fn register(
    registry: &ServiceRegistry,
    name: &str,
    cfg: &StaticAuthNPluginConfig,
) -> Arc<Service> {
    if matches!(cfg.mode, AuthNMode::AcceptAll) {
        warn!(
            name,
            "Static AuthN provider is running in `accept_all` mode: \
             all bearer tokens will be accepted with a hardcoded identity. \
             Do NOT use this mode in production."
        );
    }

    let service = Arc::new(Service::from_config(cfg));
    let api: Arc<dyn AuthenticationService> = service.clone();
    if registry.register_authentication(name, api).is_some() {
        info!(name, "Replaced existing authentication provider");
    }

    info!(
        name,
        mode = ?cfg.mode,
        token_count = cfg.tokens.len(),
        "Static authentication provider registered"
    );
    service
}
