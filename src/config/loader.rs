//! Configuration loader
//!
//! Loads run profiles from YAML files and applies environment variable overrides.
//! Priority: command line > environment variables > YAML profile > defaults

use std::env;

use crate::config::types::Config;
use crate::error::LoadgenConfigError;
use tracing::{debug, info, warn};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a run profile from a YAML file
    pub fn from_yaml(path: impl AsRef<std::path::Path>) -> Result<Config, LoadgenConfigError> {
        let path = path.as_ref();
        let config = Self::read_yaml(path)?;

        config.validate()?;

        info!(
            config_path = %path.display(),
            endpoint = %config.endpoint,
            protocol = ?config.protocol,
            batches = config.batches,
            groups_per_batch = config.groups_per_batch,
            "Run profile loaded and validated successfully"
        );

        Ok(config)
    }

    /// Parse a YAML run profile and apply environment overrides without validating.
    ///
    /// Callers that layer further overrides on top validate the final result.
    pub fn read_yaml(path: impl AsRef<std::path::Path>) -> Result<Config, LoadgenConfigError> {
        let path = path.as_ref();
        info!(
            config_path = %path.display(),
            "Loading run profile from YAML file"
        );

        let content = std::fs::read_to_string(path).map_err(|e| {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Failed to read configuration file"
            );
            LoadgenConfigError::ValidationFailed(format!("Failed to read config file: {}", e))
        })?;

        let mut config: Config = serde_yaml::from_str(&content).map_err(|e| {
            warn!(
                config_path = %path.display(),
                error = %e,
                "Failed to parse YAML configuration"
            );
            LoadgenConfigError::ValidationFailed(format!("Failed to parse YAML: {}", e))
        })?;

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load configuration with priority: environment variables > provided config > defaults
    pub fn load(provided: Option<Config>) -> Result<Config, LoadgenConfigError> {
        let config = Self::resolve(provided);

        config.validate().map_err(|e| {
            warn!(error = %e, "Configuration validation failed");
            e
        })?;

        Ok(config)
    }

    /// Provided config (or defaults) with environment overrides, not yet validated
    pub fn resolve(provided: Option<Config>) -> Config {
        let mut config = provided.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        config
    }

    /// Apply environment variable overrides to configuration
    ///
    /// Transport, endpoint and control file are read from the environment by the
    /// command line parser, so only the profile settings are handled here.
    fn apply_env_overrides(config: &mut Config) {
        // OTLP_LOADGEN_BATCHES
        if let Ok(value) = env::var("OTLP_LOADGEN_BATCHES") {
            match value.parse::<usize>() {
                Ok(batches) => {
                    debug!(
                        env_var = "OTLP_LOADGEN_BATCHES",
                        value = batches,
                        "Applying environment variable override"
                    );
                    config.batches = batches;
                }
                Err(e) => {
                    warn!(
                        env_var = "OTLP_LOADGEN_BATCHES",
                        value = %value,
                        error = %e,
                        "Failed to parse environment variable, keeping current value"
                    );
                }
            }
        }

        // OTLP_LOADGEN_GROUPS_PER_BATCH
        if let Ok(value) = env::var("OTLP_LOADGEN_GROUPS_PER_BATCH") {
            match value.parse::<usize>() {
                Ok(groups) => {
                    debug!(
                        env_var = "OTLP_LOADGEN_GROUPS_PER_BATCH",
                        value = groups,
                        "Applying environment variable override"
                    );
                    config.groups_per_batch = groups;
                }
                Err(e) => {
                    warn!(
                        env_var = "OTLP_LOADGEN_GROUPS_PER_BATCH",
                        value = %value,
                        error = %e,
                        "Failed to parse environment variable, keeping current value"
                    );
                }
            }
        }

        // OTLP_LOADGEN_SERVICE_NAME
        if let Ok(name) = env::var("OTLP_LOADGEN_SERVICE_NAME") {
            config.service_name = name;
        }

        // OTLP_LOADGEN_SERVICE_VERSION
        if let Ok(version) = env::var("OTLP_LOADGEN_SERVICE_VERSION") {
            config.service_version = version;
        }
    }
}
