//! Configuration for SSO binding.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SsoBindingConfig {
    /// Location of the opt-in descriptor, relative to a deployment's resource root.
    pub descriptor_path: String,

    /// Upper bound on the descriptor size; larger files are rejected.
    pub max_descriptor_bytes: u64,
}

impl Default for SsoBindingConfig {
    fn default() -> Self {
        Self {
            descriptor_path: "WEB-INF/sso-binding.json".to_owned(),
            max_descriptor_bytes: 64 * 1024,
        }
    }
}
