//! Configuration module
//!
//! Run configuration for the load generator: command line flags, YAML run
//! profiles, environment variables and programmatic API.

pub mod cli;
pub mod loader;
pub mod types;

pub use cli::{Cli, LogFormat};
pub use loader::ConfigLoader;
pub use types::{Config, ConfigBuilder, TransportProtocol};
