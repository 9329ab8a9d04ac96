//! Registration of the static authorization provider.

use std::sync::Arc;

use sso_binding_sdk::{AuthorizationService, ServiceRegistry};
use tracing::info;

use crate::config::StaticAuthZPluginConfig;
use crate::domain::Service;

/// Build a [`Service`] from `cfg` and publish it in `registry` under `name`.
///
/// A provider already registered under `name` is replaced.
#[allow(clippy::must_use_candidate)] // registration is the side effect
pub fn register(
    registry: &ServiceRegistry,
    name: &str,
    cfg: &StaticAuthZPluginConfig,
) -> Arc<Service> {
    let service = Arc::new(Service::from_config(cfg));
    let api: Arc<dyn AuthorizationService> = service.clone();
    if registry.register_authorization(name, api).is_some() {
        info!(name, "Replaced existing authorization provider");
    }

    info!(
        name,
        mode = ?cfg.mode,
        rule_count = cfg.rules.len(),
        "Static authorization provider registered"
    );
    service
}
