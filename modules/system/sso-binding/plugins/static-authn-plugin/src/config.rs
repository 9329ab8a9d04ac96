//! Configuration for the static authentication plugin.

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Authentication mode.
    pub mode: AuthNMode,

    /// Default principal returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-principal mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticAuthNPluginConfig {
    fn default() -> Self {
        Self {
            mode: AuthNMode::AcceptAll,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
        }
    }
}

/// Authentication mode.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthNMode {
    /// Accept any non-empty token and return the default principal.
    #[default]
    AcceptAll,
    /// Map specific tokens to specific principals.
    StaticTokens,
}

/// Principal configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Subject name.
    pub subject: String,

    /// Roles granted to the subject.
    pub roles: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            subject: "dev-user".to_owned(),
            roles: Vec::new(),
        }
    }
}

/// Maps a static token to a specific principal.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The principal to return when this token is presented.
    pub identity: IdentityConfig,
}
