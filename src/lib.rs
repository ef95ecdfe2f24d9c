//! OTLP Log Load Generator
//!
//! Builds a fixed number of OTLP log export batches with rotating severities and
//! random bodies, and sends them to a collector over gRPC or OTLP/HTTP protobuf.
//! Optionally writes everything it sent to a JSON control file so the receiving
//! side can be checked against it.
//!
//! # Features
//!
//! - OTLP gRPC (`LogsService/Export`, plaintext) and OTLP/HTTP protobuf transports
//! - Fail-fast pipeline: the first transmission error aborts the run
//! - Control file in OTLP/JSON
//! - Configurable via command line, YAML run profile, environment variables or programmatic API
//! - Mock gRPC collector for testing
//!
//! # Example
//!
//! ```no_run
//! use otlp_log_loadgen::otlp::{LogBatchGenerator, LoremSentences, Transport, run};
//! use otlp_log_loadgen::{Config, LoadgenError};
//!
//! # async fn example() -> Result<(), LoadgenError> {
//! let config = Config::default();
//! let mut transport = Transport::connect(&config).await?;
//! let mut generator = LogBatchGenerator::new((&config).into(), LoremSentences::default())?;
//! let summary = run(&config, &mut generator, &mut transport).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod mock;
pub mod otlp;

// Re-export public API
pub use config::{Cli, Config, ConfigBuilder, ConfigLoader, LogFormat, TransportProtocol};
pub use error::{ControlFileError, ExportError, LoadgenConfigError, LoadgenError};
pub use mock::service::MockLogsCollector;
pub use otlp::RunSummary;

// Initialize tracing subscriber for structured logging
use tracing_subscriber::EnvFilter;

/// Initialize structured logging
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
