//! SSO Binding
//!
//! Binds a deployed web application to a named SSO authentication provider
//! and a named authorization provider, then installs a request extension that
//! enforces both for every request the application receives.
//!
//! The binding runs once per deployment unit:
//! descriptor presence check → parse → resolve → build → attach.
//! Failures surface at deployment time through [`BindingOutcome::Failed`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod middleware;

pub use config::SsoBindingConfig;
pub use domain::{
    AppConfiguration, AttachmentError, BindingError, BindingOrchestrator, BindingOutcome,
    BindingState, DeploymentProcessor, DeploymentUnit, DescriptorParseError, DescriptorParser,
    DirectoryRoot, JsonDescriptorParser, MemoryRoot, ProviderNotFoundError, RequestExtension,
    RequestRejection, ResourceRoot,
};
