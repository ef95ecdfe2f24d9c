//! Command line surface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::ConfigLoader;
use crate::config::types::{Config, TransportProtocol};
use crate::error::LoadgenConfigError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Send synthetic OTLP log batches to an endpoint
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Send to HTTP protobuf, otherwise to gRPC
    #[arg(long, env = "OTLP_LOADGEN_HTTP")]
    pub http: bool,

    /// OTLP endpoint to send logs to [default: localhost:7281]
    #[arg(long, env = "OTLP_LOADGEN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Path to the control file (empty disables it)
    #[arg(long, env = "OTLP_LOADGEN_CONTROL_FILE")]
    pub control_file: Option<String>,

    /// YAML run profile
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of export batches
    #[arg(long)]
    pub batches: Option<usize>,

    /// Resource-log groups per batch
    #[arg(long)]
    pub groups_per_batch: Option<usize>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolve the final run configuration: profile, then environment, then flags.
    ///
    /// Validation runs once, after every layer has been applied.
    pub fn into_config(self) -> Result<Config, LoadgenConfigError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::read_yaml(path)?,
            None => ConfigLoader::resolve(None),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if self.http {
            config.protocol = TransportProtocol::Http;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(path) = &self.control_file {
            config.control_file = Some(PathBuf::from(path));
        }
        if let Some(batches) = self.batches {
            config.batches = batches;
        }
        if let Some(groups) = self.groups_per_batch {
            config.groups_per_batch = groups;
        }
    }
}
