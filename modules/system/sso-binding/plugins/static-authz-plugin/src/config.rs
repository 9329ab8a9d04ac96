//! Configuration for the static authorization plugin.

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthZPluginConfig {
    /// Authorization mode.
    pub mode: AuthZMode,

    /// Ordered access rules for `rules` mode.
    pub rules: Vec<AccessRule>,
}

/// Authorization mode.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthZMode {
    /// Permit every request.
    #[default]
    AllowAll,
    /// Deny every request.
    DenyAll,
    /// Evaluate [`AccessRule`]s in order.
    Rules,
}

/// A single path-based access rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessRule {
    /// Request paths at or below this prefix match the rule.
    ///
    /// Matching is per path segment: `/admin` covers `/admin` and
    /// `/admin/users` but not `/administrator`.
    pub path_prefix: String,

    /// HTTP methods the rule applies to. Empty matches any method.
    #[serde(default)]
    pub methods: Vec<String>,

    /// Role the principal must hold for the rule to permit.
    #[serde(default)]
    pub required_role: Option<String>,
}

impl AccessRule {
    /// Whether this rule applies to `method` on `path`.
    #[must_use]
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.covers_path(path)
            && (self.methods.is_empty()
                || self.methods.iter().any(|m| m.eq_ignore_ascii_case(method)))
    }

    fn covers_path(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix(self.path_prefix.as_str()) else {
            return false;
        };
        rest.is_empty() || rest.starts_with('/') || self.path_prefix.ends_with('/')
    }
}
