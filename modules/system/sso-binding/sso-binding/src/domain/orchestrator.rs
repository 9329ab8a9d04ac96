//! Per-deployment binding pipeline.
//!
//! ```text
//! start ──(no descriptor)──────────────────────────────▶ NotApplicable
//!   │
//!   ▼
//! DescriptorFound ─▶ Parsed ─▶ AuthenticationResolved ─▶ FullyResolved ─▶ Installed
//!        │             │                │                      │
//!        └─────────────┴────────────────┴──────────────────────┴────────▶ Failed
//! ```
//!
//! Each deployment runs the pipeline to a terminal state on the calling
//! thread. The registry is only ever read.

use std::sync::Arc;

use sso_binding_sdk::ServiceLookup;
use tracing::{debug, error, info};

use crate::config::SsoBindingConfig;

use super::deployment::DeploymentUnit;
use super::descriptor::{DescriptorParser, JsonDescriptorParser};
use super::error::{BindingError, DescriptorParseError};
use super::extension::{self, RequestExtension};
use super::resolver::{resolve_authentication, resolve_authorization};

/// Where a deployment's binding pipeline stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No descriptor; the application did not opt in.
    NotApplicable,
    DescriptorFound,
    Parsed,
    AuthenticationResolved,
    FullyResolved,
    Installed,
    Failed,
}

/// Terminal result of binding one deployment.
#[derive(Debug)]
pub enum BindingOutcome {
    NotApplicable,
    Installed(Arc<RequestExtension>),
    Failed(BindingError),
}

impl BindingOutcome {
    #[must_use]
    pub fn state(&self) -> BindingState {
        match self {
            Self::NotApplicable => BindingState::NotApplicable,
            Self::Installed(_) => BindingState::Installed,
            Self::Failed(_) => BindingState::Failed,
        }
    }

    /// Collapse into a `Result` for hosts that treat failure as fatal.
    ///
    /// # Errors
    ///
    /// Returns the [`BindingError`] carried by `Failed`.
    pub fn into_result(self) -> Result<Option<Arc<RequestExtension>>, BindingError> {
        match self {
            Self::NotApplicable => Ok(None),
            Self::Installed(ext) => Ok(Some(ext)),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Hook invoked by the hosting environment for every deployment unit.
pub trait DeploymentProcessor: Send + Sync {
    /// Relative order among processors; lower runs first.
    fn priority(&self) -> u32;

    /// Process a deployment. An error blocks the deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment must not complete.
    fn deploy(&self, unit: &DeploymentUnit) -> anyhow::Result<()>;

    fn undeploy(&self, unit: &DeploymentUnit);
}

/// Binds deployments to their SSO providers.
pub struct BindingOrchestrator {
    config: SsoBindingConfig,
    registry: Arc<dyn ServiceLookup>,
    parser: Box<dyn DescriptorParser>,
}

impl BindingOrchestrator {
    /// Runs after the container's own deployment processors.
    pub const PRIORITY: u32 = 0x8000;

    #[must_use]
    pub fn new(config: SsoBindingConfig, registry: Arc<dyn ServiceLookup>) -> Self {
        let parser = Box::new(JsonDescriptorParser::new(config.max_descriptor_bytes));
        Self {
            config,
            registry,
            parser,
        }
    }

    /// Replace the descriptor parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl DescriptorParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Run the binding pipeline for `unit` to a terminal state.
    #[tracing::instrument(skip_all, fields(deployment = %unit.name()))]
    pub fn bind(&self, unit: &DeploymentUnit) -> BindingOutcome {
        match self.run(unit) {
            Ok(None) => BindingOutcome::NotApplicable,
            Ok(Some(ext)) => BindingOutcome::Installed(ext),
            Err(e) => {
                error!(
                    deployment = %unit.name(),
                    failed_after = ?e.failed_after(),
                    error = %e,
                    "SSO binding failed"
                );
                BindingOutcome::Failed(e)
            }
        }
    }

    fn run(&self, unit: &DeploymentUnit) -> Result<Option<Arc<RequestExtension>>, BindingError> {
        let path = self.config.descriptor_path.as_str();
        let descriptor_error = |source: DescriptorParseError| BindingError::DescriptorParse {
            path: path.to_owned(),
            source,
        };

        let opened = unit
            .open_resource(path)
            .map_err(|e| descriptor_error(e.into()))?;
        let Some(mut descriptor) = opened else {
            debug!(state = ?BindingState::NotApplicable, "No SSO descriptor at {path}");
            return Ok(None);
        };
        debug!(state = ?BindingState::DescriptorFound, "SSO descriptor found");

        let config = self.parser.parse(&mut descriptor).map_err(descriptor_error)?;
        debug!(
            state = ?BindingState::Parsed,
            authentication_id = %config.authentication_id(),
            authorization_id = %config.authorization_id(),
            "SSO descriptor parsed"
        );

        let authentication = resolve_authentication(&*self.registry, config.authentication_id())?;
        debug!(state = ?BindingState::AuthenticationResolved, "Authentication provider resolved");

        let authorization = resolve_authorization(&*self.registry, config.authorization_id())?;
        debug!(state = ?BindingState::FullyResolved, "Authorization provider resolved");

        let ext = Arc::new(extension::build(unit.name(), authentication, authorization));
        unit.attach_extension(Arc::clone(&ext))?;

        info!(
            deployment = %unit.name(),
            authentication_id = %config.authentication_id(),
            authorization_id = %config.authorization_id(),
            "attached SSO request extension for deployment {}",
            unit.name()
        );
        Ok(Some(ext))
    }
}

impl DeploymentProcessor for BindingOrchestrator {
    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    /// The returned error's top-level message names the deployment and the
    /// cause, so hosts printing it with `{}` still see the missing provider
    /// or the parse problem. The [`BindingError`] stays downcastable.
    fn deploy(&self, unit: &DeploymentUnit) -> anyhow::Result<()> {
        self.bind(unit).into_result().map(|_| ()).map_err(|e| {
            let message = format!("deployment '{}' blocked: {e}", unit.name());
            anyhow::Error::new(e).context(message)
        })
    }

    fn undeploy(&self, _unit: &DeploymentUnit) {}
}
