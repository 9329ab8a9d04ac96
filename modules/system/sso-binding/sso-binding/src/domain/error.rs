//! Errors raised while binding a deployment to its SSO providers.

use sso_binding_sdk::ProviderKind;
use thiserror::Error;

use super::orchestrator::BindingState;

/// The descriptor was present but could not be turned into an `AppConfiguration`.
#[derive(Error, Debug)]
pub enum DescriptorParseError {
    #[error("failed to read descriptor: {0}")]
    Io(#[from] std::io::Error),

    #[error("descriptor exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("descriptor is empty")]
    Empty,

    #[error("malformed descriptor: {reason}")]
    Malformed { reason: String },

    #[error("descriptor is missing required field '{field}'")]
    MissingField { field: &'static str },
}

impl DescriptorParseError {
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// No provider of the requested kind is registered under the requested name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot find an SSO {kind} provider named '{name}'")]
pub struct ProviderNotFoundError {
    pub kind: ProviderKind,
    pub name: String,
}

impl ProviderNotFoundError {
    #[must_use]
    pub fn new(kind: ProviderKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// The deployment refused the request extension.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("deployment '{deployment}' rejected the request extension: {reason}")]
pub struct AttachmentError {
    pub deployment: String,
    pub reason: String,
}

/// Fatal, deployment-blocking binding failure.
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("invalid SSO descriptor '{path}': {source}")]
    DescriptorParse {
        path: String,
        #[source]
        source: DescriptorParseError,
    },

    #[error(transparent)]
    ProviderNotFound(#[from] ProviderNotFoundError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

impl BindingError {
    /// The last state the pipeline reached before this error stopped it.
    #[must_use]
    pub fn failed_after(&self) -> BindingState {
        match self {
            Self::DescriptorParse { .. } => BindingState::DescriptorFound,
            Self::ProviderNotFound(e) => match e.kind {
                ProviderKind::Authentication => BindingState::Parsed,
                ProviderKind::Authorization => BindingState::AuthenticationResolved,
            },
            Self::Attachment(_) => BindingState::FullyResolved,
        }
    }
}
