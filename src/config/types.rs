//! Configuration type definitions
//!
//! Defines the run configuration for the load generator.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LoadgenConfigError;
use crate::otlp::severity::{DEFAULT_SEVERITIES, Severity};

/// Wire transport used to deliver batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportProtocol {
    /// OTLP gRPC `LogsService/Export` over a plaintext channel
    Grpc,
    /// OTLP/HTTP with a binary protobuf body
    Http,
}

impl Default for TransportProtocol {
    fn default() -> Self {
        Self::Grpc
    }
}

/// Run configuration for the load generator
///
/// # Default Values
///
/// - `protocol`: gRPC
/// - `endpoint`: `localhost:7281`
/// - `control_file`: none (no control file is written)
/// - `batches`: `10`
/// - `groups_per_batch`: `2`
/// - `severities`: debug, info, warn, error
/// - `service_name` / `service_version`: `test-service` / `0.1.0`
///
/// # Example
///
/// ```no_run
/// use otlp_log_loadgen::{ConfigBuilder, TransportProtocol};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConfigBuilder::new()
///     .protocol(TransportProtocol::Http)
///     .endpoint("http://localhost:4318/v1/logs")
///     .control_file("./control.json")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Transport selection (default: grpc)
    #[serde(default)]
    pub protocol: TransportProtocol,

    /// gRPC target or full HTTP URL (default: localhost:7281)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Where to write the control file; `None` or an empty path skips it
    #[serde(default)]
    pub control_file: Option<PathBuf>,

    /// Number of export batches (default: 10)
    #[serde(default = "default_batches")]
    pub batches: usize,

    /// Resource-log groups per batch (default: 2)
    #[serde(default = "default_groups_per_batch")]
    pub groups_per_batch: usize,

    /// Severity rotation, indexed by batch number
    #[serde(default = "default_severities")]
    pub severities: Vec<Severity>,

    /// `service.name` resource attribute
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// `service.version` resource attribute
    #[serde(default = "default_service_version")]
    pub service_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: TransportProtocol::default(),
            endpoint: default_endpoint(),
            control_file: None,
            batches: default_batches(),
            groups_per_batch: default_groups_per_batch(),
            severities: default_severities(),
            service_name: default_service_name(),
            service_version: default_service_version(),
        }
    }
}

impl Config {
    /// Control file destination, if one was requested
    pub fn control_path(&self) -> Option<&Path> {
        self.control_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Total resource-log groups a successful run transmits
    pub fn expected_lines(&self) -> usize {
        self.batches * self.groups_per_batch
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), LoadgenConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(LoadgenConfigError::InvalidEndpoint(
                "Endpoint cannot be empty".to_string(),
            ));
        }

        if self.protocol == TransportProtocol::Http {
            let url = url::Url::parse(&self.endpoint).map_err(|e| {
                LoadgenConfigError::InvalidEndpoint(format!(
                    "HTTP endpoint must be a full URL ({}): {}",
                    self.endpoint, e
                ))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(LoadgenConfigError::InvalidEndpoint(
                    "HTTP endpoint must use http:// or https:// scheme".to_string(),
                ));
            }
        }

        if self.batches == 0 {
            return Err(LoadgenConfigError::InvalidCount(
                "Batch count must be greater than 0".to_string(),
            ));
        }

        if self.groups_per_batch == 0 {
            return Err(LoadgenConfigError::InvalidCount(
                "Groups per batch must be greater than 0".to_string(),
            ));
        }

        if self.severities.is_empty() {
            return Err(LoadgenConfigError::MissingRequiredField(
                "severities must contain at least one level".to_string(),
            ));
        }

        if self.service_name.is_empty() {
            return Err(LoadgenConfigError::MissingRequiredField(
                "service_name cannot be empty".to_string(),
            ));
        }

        if let Some(path) = self.control_path() {
            if path.to_string_lossy().contains('\0') {
                return Err(LoadgenConfigError::ValidationFailed(
                    "Control file path cannot contain null bytes".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for creating configurations programmatically
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the transport
    pub fn protocol(mut self, protocol: TransportProtocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Set the endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Request a control file at `path`
    pub fn control_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.control_file = Some(path.into());
        self
    }

    /// Set the number of batches
    pub fn batches(mut self, batches: usize) -> Self {
        self.config.batches = batches;
        self
    }

    /// Set the number of groups per batch
    pub fn groups_per_batch(mut self, groups: usize) -> Self {
        self.config.groups_per_batch = groups;
        self
    }

    /// Replace the severity rotation
    pub fn severities(mut self, severities: impl Into<Vec<Severity>>) -> Self {
        self.config.severities = severities.into();
        self
    }

    /// Set the resource attributes
    pub fn service(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self.config.service_version = version.into();
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<Config, LoadgenConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// Default value functions
fn default_endpoint() -> String {
    "localhost:7281".to_string()
}

fn default_batches() -> usize {
    10
}

fn default_groups_per_batch() -> usize {
    2
}

fn default_severities() -> Vec<Severity> {
    DEFAULT_SEVERITIES.to_vec()
}

fn default_service_name() -> String {
    "test-service".to_string()
}

fn default_service_version() -> String {
    "0.1.0".to_string()
}
