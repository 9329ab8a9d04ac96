//! Domain layer for SSO binding.

pub mod deployment;
pub mod descriptor;
pub mod error;
pub mod extension;
pub mod orchestrator;
pub mod resolver;

pub use deployment::{DeploymentUnit, DirectoryRoot, MemoryRoot, ResourceRoot};
pub use descriptor::{AppConfiguration, DescriptorParser, JsonDescriptorParser};
pub use error::{AttachmentError, BindingError, DescriptorParseError, ProviderNotFoundError};
pub use extension::{RequestExtension, RequestRejection};
pub use orchestrator::{BindingOrchestrator, BindingOutcome, BindingState, DeploymentProcessor};
