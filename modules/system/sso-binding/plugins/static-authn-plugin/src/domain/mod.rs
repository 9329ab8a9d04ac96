//! Domain layer for the static authentication plugin.

mod client;
pub mod service;

pub use service::Service;
