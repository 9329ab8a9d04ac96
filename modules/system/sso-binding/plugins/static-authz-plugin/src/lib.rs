#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Authorization Plugin
//!
//! This plugin provides a static authorization policy for development and testing.
//!
//! ## Modes
//!
//! - **`allow_all`** (default): every authenticated principal is permitted.
//! - **`deny_all`**: every request is denied.
//! - **`rules`**: the first rule whose path prefix and method match decides.
//!   A rule may require a role. Requests matching no rule are denied.
//!
//! ## Configuration
//!
//! ```yaml
//! mode: rules
//! rules:
//!   - path_prefix: "/admin"
//!     required_role: "admin"
//!   - path_prefix: "/orders"
//!     methods: ["GET"]
//!   - path_prefix: "/"
//!     required_role: "staff"
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use domain::Service;
pub use module::register;
