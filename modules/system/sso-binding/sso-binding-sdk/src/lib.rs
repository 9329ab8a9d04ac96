//! SSO Binding SDK
//!
//! This crate provides the public contracts shared by the `sso_binding` core
//! and the provider implementations it binds:
//!
//! - [`AuthenticationService`] - Capability trait for SSO authentication providers
//! - [`AuthorizationService`] - Capability trait for authorization providers
//! - [`Principal`], [`RequestMetadata`], [`AuthorizationDecision`] - Request models
//! - [`AuthenticationError`], [`AuthorizationError`] - Error types
//! - [`ServiceRegistry`] / [`ServiceLookup`] - Name-keyed provider directory
//!
//! ## Usage
//!
//! Providers are published under a name by the hosting environment:
//!
//! ```ignore
//! use sso_binding_sdk::ServiceRegistry;
//!
//! let registry = ServiceRegistry::new();
//! registry.register_authentication("cas-prod", Arc::new(my_cas_provider));
//! registry.register_authorization("acl-default", Arc::new(my_acl_provider));
//! ```
//!
//! The binding core only ever reads the registry through [`ServiceLookup`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod registry;

// Re-export main types at crate root
pub use api::{AuthenticationService, AuthorizationService};
pub use error::{AuthenticationError, AuthorizationError};
pub use models::{AuthorizationDecision, Principal, RequestMetadata};
pub use registry::{ProviderKind, ServiceLookup, ServiceRegistry};
