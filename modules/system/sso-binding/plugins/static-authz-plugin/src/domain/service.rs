//! Service implementation for the static authorization plugin.

use sso_binding_sdk::{AuthorizationDecision, Principal, RequestMetadata};

use crate::config::{AccessRule, AuthZMode, StaticAuthZPluginConfig};

/// Static authorization service.
pub struct Service {
    mode: AuthZMode,
    rules: Vec<AccessRule>,
}

impl Service {
    #[must_use]
    pub fn from_config(cfg: &StaticAuthZPluginConfig) -> Self {
        Self {
            mode: cfg.mode.clone(),
            rules: cfg.rules.clone(),
        }
    }

    /// Decide whether `principal` may perform `request`.
    #[must_use]
    pub fn evaluate(
        &self,
        principal: &Principal,
        request: &RequestMetadata,
    ) -> AuthorizationDecision {
        match self.mode {
            AuthZMode::AllowAll => AuthorizationDecision::permit(),
            AuthZMode::DenyAll => AuthorizationDecision::deny("all requests are denied"),
            AuthZMode::Rules => self.evaluate_rules(principal, request),
        }
    }

    fn evaluate_rules(
        &self,
        principal: &Principal,
        request: &RequestMetadata,
    ) -> AuthorizationDecision {
        let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.matches(&request.method, &request.path))
        else {
            return AuthorizationDecision::deny(format!(
                "no rule matches {} {}",
                request.method, request.path
            ));
        };

        match &rule.required_role {
            Some(role) if !principal.has_role(role) => {
                AuthorizationDecision::deny(format!("role '{role}' required"))
            }
            _ => AuthorizationDecision::permit(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn rule(prefix: &str, methods: &[&str], role: Option<&str>) -> AccessRule {
        AccessRule {
            path_prefix: prefix.to_owned(),
            methods: methods.iter().map(|m| (*m).to_owned()).collect(),
            required_role: role.map(str::to_owned),
        }
    }

    fn rules_service() -> Service {
        Service::from_config(&StaticAuthZPluginConfig {
            mode: AuthZMode::Rules,
            rules: vec![
                rule("/admin", &[], Some("admin")),
                rule("/orders", &["GET"], None),
                rule("/orders", &[], Some("staff")),
            ],
        })
    }

    #[test]
    fn allow_all_permits() {
        let service = Service::from_config(&StaticAuthZPluginConfig::default());

        let request = RequestMetadata::new("DELETE", "/x");
        let decision = service.evaluate(&Principal::new("alice"), &request);
        assert!(decision.permitted);
    }

    #[test]
    fn deny_all_denies_with_reason() {
        let service = Service::from_config(&StaticAuthZPluginConfig {
            mode: AuthZMode::DenyAll,
            rules: Vec::new(),
        });

        let request = RequestMetadata::new("GET", "/");
        let decision = service.evaluate(&Principal::new("alice"), &request);
        assert!(!decision.permitted);
        assert!(decision.deny_reason.is_some());
    }

    #[test]
    fn first_matching_rule_decides() {
        let service = rules_service();
        let bob = Principal::new("bob");

        assert!(service.evaluate(&bob, &RequestMetadata::new("GET", "/orders/1")).permitted);

        let decision = service.evaluate(&bob, &RequestMetadata::new("POST", "/orders"));
        assert!(!decision.permitted);
        assert_eq!(decision.deny_reason.as_deref(), Some("role 'staff' required"));
    }

    #[test]
    fn required_role_is_checked() {
        let service = rules_service();
        let admin = Principal::new("root").with_roles(vec!["admin".to_owned()]);

        let request = RequestMetadata::new("GET", "/admin/users");

        assert!(service.evaluate(&admin, &request).permitted);
        assert!(!service.evaluate(&Principal::new("bob"), &request).permitted);
    }

    #[test]
    fn unmatched_request_is_denied() {
        let service = rules_service();

        let request = RequestMetadata::new("GET", "/reports");
        let decision = service.evaluate(&Principal::new("bob"), &request);
        assert!(!decision.permitted);
        assert_eq!(decision.deny_reason.as_deref(), Some("no rule matches GET /reports"));
    }

    #[test]
    fn rule_prefix_does_not_leak_into_sibling_paths() {
        let service = rules_service();
        let admin = Principal::new("root").with_roles(vec!["admin".to_owned()]);

        let request = RequestMetadata::new("GET", "/administrator");
        let decision = service.evaluate(&admin, &request);
        assert!(!decision.permitted);
        assert_eq!(
            decision.deny_reason.as_deref(),
            Some("no rule matches GET /administrator")
        );
    }
}
