//! Service implementation for the static authentication plugin.

use std::collections::HashMap;

use sso_binding_sdk::Principal;

use crate::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig};

/// Static authentication service.
///
/// Provides token-to-principal mapping based on configuration mode:
/// - `accept_all`: Any non-empty token maps to the default principal
/// - `static_tokens`: Specific tokens map to specific principals
pub struct Service {
    mode: AuthNMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            mode: cfg.mode.clone(),
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    /// Authenticate a bearer token and return the principal.
    ///
    /// Returns `None` if the token is not recognized (in `static_tokens` mode)
    /// or empty.
    #[must_use]
    pub fn authenticate(&self, bearer_token: &str) -> Option<Principal> {
        if bearer_token.is_empty() {
            return None;
        }

        let identity = match &self.mode {
            AuthNMode::AcceptAll => &self.default_identity,
            AuthNMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(Principal::new(identity.subject.clone()).with_roles(identity.roles.clone()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TokenMapping;

    fn default_config() -> StaticAuthNPluginConfig {
        StaticAuthNPluginConfig::default()
    }

    #[test]
    fn accept_all_mode_returns_default_identity() {
        let service = Service::from_config(&default_config());

        let principal = service.authenticate("any-token-value").unwrap();
        assert_eq!(principal.subject(), "dev-user");
        assert!(principal.roles().is_empty());
    }

    #[test]
    fn accept_all_mode_rejects_empty_token() {
        let service = Service::from_config(&default_config());

        assert!(service.authenticate("").is_none());
    }

    #[test]
    fn static_tokens_mode_returns_mapped_identity() {
        let cfg = StaticAuthNPluginConfig {
            mode: AuthNMode::StaticTokens,
            tokens: vec![TokenMapping {
                token: "ST-alice".to_owned(),
                identity: IdentityConfig {
                    subject: "alice".to_owned(),
                    roles: vec!["admin".to_owned()],
                },
            }],
            ..default_config()
        };

        let service = Service::from_config(&cfg);

        let principal = service.authenticate("ST-alice").unwrap();
        assert_eq!(principal.subject(), "alice");
        assert!(principal.has_role("admin"));
    }

    #[test]
    fn static_tokens_mode_rejects_unknown_token() {
        let cfg = StaticAuthNPluginConfig {
            mode: AuthNMode::StaticTokens,
            tokens: vec![TokenMapping {
                token: "known-token".to_owned(),
                identity: IdentityConfig::default(),
            }],
            ..default_config()
        };

        let service = Service::from_config(&cfg);

        assert!(service.authenticate("unknown-token").is_none());
    }
}
