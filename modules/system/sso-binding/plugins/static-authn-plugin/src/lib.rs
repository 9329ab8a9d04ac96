#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Authentication Plugin
//!
//! This plugin provides static token-to-principal mapping for development and testing.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty bearer token, returns the configured
//!   default principal.
//!
//! - **`static_tokens`**: Maps specific tokens to specific principals. Useful for E2E tests
//!   with distinct users.
//!
//! ## Configuration
//!
//! ```yaml
//! mode: static_tokens
//! default_identity:
//!   subject: "dev-user"
//!   roles: ["staff"]
//! tokens:
//!   - token: "ST-alice"
//!     identity:
//!       subject: "alice"
//!       roles: ["staff", "admin"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use domain::Service;
pub use module::register;
