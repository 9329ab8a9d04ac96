//! Domain layer for the static authorization plugin.

mod client;
pub mod service;

pub use service::Service;
