#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end binding of deployments against the static providers.

use std::sync::Arc;

use sso_binding::{
    BindingError, BindingOrchestrator, BindingOutcome, BindingState, DeploymentProcessor,
    DeploymentUnit, DescriptorParseError, DirectoryRoot, MemoryRoot, RequestRejection,
    SsoBindingConfig,
};
use sso_binding_sdk::{
    AuthenticationService, AuthorizationService, ProviderKind, RequestMetadata, ServiceRegistry,
};
use static_authn_plugin::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig, TokenMapping};
use static_authz_plugin::config::{AccessRule, AuthZMode, StaticAuthZPluginConfig};
use tracing_test::traced_test;

const DESCRIPTOR: &str = "WEB-INF/sso-binding.json";

fn descriptor(authn: &str, authz: &str) -> String {
    format!(r#"{{"authenticationId": "{authn}", "authorizationId": "{authz}"}}"#)
}

fn authn_config() -> StaticAuthNPluginConfig {
    StaticAuthNPluginConfig {
        mode: AuthNMode::StaticTokens,
        tokens: vec![TokenMapping {
            token: "ST-alice".to_owned(),
            identity: IdentityConfig {
                subject: "alice".to_owned(),
                roles: vec!["staff".to_owned()],
            },
        }],
        ..StaticAuthNPluginConfig::default()
    }
}

fn authz_config() -> StaticAuthZPluginConfig {
    StaticAuthZPluginConfig {
        mode: AuthZMode::Rules,
        rules: vec![AccessRule {
            path_prefix: "/orders".to_owned(),
            methods: Vec::new(),
            required_role: Some("staff".to_owned()),
        }],
    }
}

fn populated_registry() -> Arc<ServiceRegistry> {
    let registry = Arc::new(ServiceRegistry::new());
    static_authn_plugin::register(&registry, "cas-prod", &authn_config());
    static_authz_plugin::register(&registry, "acl-default", &authz_config());
    registry
}

fn orchestrator(registry: &Arc<ServiceRegistry>) -> BindingOrchestrator {
    BindingOrchestrator::new(SsoBindingConfig::default(), registry.clone())
}

fn unit_with_descriptor(name: &str, contents: &str) -> DeploymentUnit {
    DeploymentUnit::new(
        name,
        MemoryRoot::new().with_file(DESCRIPTOR, contents.as_bytes().to_vec()),
    )
}

#[tokio::test]
#[traced_test]
async fn opted_in_deployment_gets_enforcing_extension() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-prod", "acl-default"));

    let outcome = orchestrator(&registry).bind(&unit);

    let extension = match outcome {
        BindingOutcome::Installed(extension) => extension,
        other => panic!("expected Installed, got {other:?}"),
    };
    assert_eq!(extension.deployment(), "orders.war");
    assert_eq!(unit.extensions().len(), 1);
    assert!(Arc::ptr_eq(&unit.extensions()[0], &extension));
    assert!(logs_contain("attached SSO request extension for deployment orders.war"));
    logs_assert(|lines: &[&str]| {
        let records = lines
            .iter()
            .filter(|line| line.contains("INFO"))
            .filter(|line| line.contains("attached SSO request extension"))
            .count();
        match records {
            1 => Ok(()),
            n => Err(format!("expected one installation record, found {n}")),
        }
    });

    let allowed = RequestMetadata::new("GET", "/orders/7").with_bearer_token("ST-alice");
    let principal = extension.process(&allowed).await.unwrap();
    assert_eq!(principal.subject(), "alice");

    let anonymous = RequestMetadata::new("GET", "/orders/7");
    assert!(matches!(
        extension.process(&anonymous).await,
        Err(RequestRejection::Unauthenticated(_))
    ));

    let outside = RequestMetadata::new("GET", "/reports").with_bearer_token("ST-alice");
    assert!(matches!(
        extension.process(&outside).await,
        Err(RequestRejection::Forbidden { reason: Some(_) })
    ));
}

#[test]
fn deployment_without_descriptor_is_left_alone() {
    let registry = populated_registry();
    let unit = DeploymentUnit::new("static.war", MemoryRoot::new());

    let outcome = orchestrator(&registry).bind(&unit);

    assert_eq!(outcome.state(), BindingState::NotApplicable);
    assert!(unit.extensions().is_empty());
}

#[test]
#[traced_test]
fn unknown_authorization_provider_fails_the_deployment() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-prod", "missing-acl"));

    let outcome = orchestrator(&registry).bind(&unit);

    let err = match outcome {
        BindingOutcome::Failed(BindingError::ProviderNotFound(err)) => err,
        other => panic!("expected ProviderNotFound, got {other:?}"),
    };
    assert_eq!(err.kind, ProviderKind::Authorization);
    assert_eq!(err.name, "missing-acl");
    assert!(unit.extensions().is_empty());
    assert!(logs_contain("missing-acl"));
}

#[test]
fn unknown_authentication_provider_fails_before_authorization() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-staging", "missing-acl"));

    let outcome = orchestrator(&registry).bind(&unit);

    let err = match outcome {
        BindingOutcome::Failed(BindingError::ProviderNotFound(err)) => err,
        other => panic!("expected ProviderNotFound, got {other:?}"),
    };
    assert_eq!(err.kind, ProviderKind::Authentication);
    assert_eq!(err.name, "cas-staging");
}

#[test]
fn empty_descriptor_fails_with_parse_error() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", "");

    let outcome = orchestrator(&registry).bind(&unit);

    match outcome {
        BindingOutcome::Failed(BindingError::DescriptorParse { path, source }) => {
            assert_eq!(path, DESCRIPTOR);
            assert!(matches!(source, DescriptorParseError::Empty));
        }
        other => panic!("expected DescriptorParse, got {other:?}"),
    }
    assert!(unit.extensions().is_empty());
}

#[test]
fn descriptor_missing_authorization_id_is_rejected() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", r#"{"authenticationId": "cas-prod"}"#);

    let outcome = orchestrator(&registry).bind(&unit);

    match outcome {
        BindingOutcome::Failed(BindingError::DescriptorParse { source, .. }) => {
            assert!(matches!(
                source,
                DescriptorParseError::MissingField {
                    field: "authorizationId"
                }
            ));
        }
        other => panic!("expected DescriptorParse, got {other:?}"),
    }
}

#[test]
fn descriptor_is_read_from_exploded_directory() {
    let registry = populated_registry();
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("WEB-INF")).unwrap();
    std::fs::write(dir.path().join(DESCRIPTOR), descriptor("cas-prod", "acl-default")).unwrap();

    let unit = DeploymentUnit::new("orders.war", DirectoryRoot::new(dir.path()));
    let outcome = orchestrator(&registry).bind(&unit);

    assert_eq!(outcome.state(), BindingState::Installed);
}

#[test]
fn exploded_directory_without_descriptor_is_not_applicable() {
    let registry = populated_registry();
    let dir = tempfile::tempdir().unwrap();

    let unit = DeploymentUnit::new("plain.war", DirectoryRoot::new(dir.path()));

    assert_eq!(
        orchestrator(&registry).bind(&unit).state(),
        BindingState::NotApplicable
    );
}

#[test]
fn aborted_deployment_refuses_attachment() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-prod", "acl-default"));
    unit.abort();

    let outcome = orchestrator(&registry).bind(&unit);

    let err = match outcome {
        BindingOutcome::Failed(BindingError::Attachment(err)) => err,
        other => panic!("expected Attachment, got {other:?}"),
    };
    assert_eq!(err.deployment, "orders.war");
    assert!(unit.extensions().is_empty());
}

#[test]
fn extension_keeps_providers_resolved_at_bind_time() {
    let registry = populated_registry();
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-prod", "acl-default"));

    let extension = orchestrator(&registry).bind(&unit).into_result().unwrap().unwrap();

    let original_authn = registry.deregister_authentication("cas-prod").unwrap();
    let original_authz = registry.deregister_authorization("acl-default").unwrap();
    static_authn_plugin::register(&registry, "cas-prod", &StaticAuthNPluginConfig::default());

    assert!(Arc::ptr_eq(extension.authentication(), &original_authn));
    assert!(Arc::ptr_eq(extension.authorization(), &original_authz));
}

#[test]
fn two_deployments_share_provider_instances() {
    let registry = populated_registry();
    let orchestrator = orchestrator(&registry);
    let first = unit_with_descriptor("orders.war", &descriptor("cas-prod", "acl-default"));
    let second = unit_with_descriptor("billing.war", &descriptor("cas-prod", "acl-default"));

    let a = orchestrator.bind(&first).into_result().unwrap().unwrap();
    let b = orchestrator.bind(&second).into_result().unwrap().unwrap();

    let authn: &Arc<dyn AuthenticationService> = a.authentication();
    let authz: &Arc<dyn AuthorizationService> = a.authorization();
    assert!(Arc::ptr_eq(authn, b.authentication()));
    assert!(Arc::ptr_eq(authz, b.authorization()));
}

#[test]
fn processor_blocks_failed_deployment() {
    let registry = populated_registry();
    let processor: &dyn DeploymentProcessor = &orchestrator(&registry);
    let unit = unit_with_descriptor("orders.war", &descriptor("cas-prod", "nope"));

    let err = processor.deploy(&unit).unwrap_err();

    assert_eq!(processor.priority(), BindingOrchestrator::PRIORITY);
    assert!(err.to_string().contains("orders.war"));
    assert!(err.to_string().contains("cannot find an SSO authorization provider named 'nope'"));
    assert!(err.downcast_ref::<BindingError>().is_some());
}
