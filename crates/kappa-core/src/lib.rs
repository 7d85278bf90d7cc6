//! Kappa Core - result types, session protocol, configuration and errors

pub mod config;
pub mod error;
pub mod protocol;
pub mod types;

pub use config::{EngineConfig, KappaConfig, ServerConfig};
pub use error::{Error, Result};
pub use protocol::*;
pub use types::*;
