//! Error types for the OTLP log load generator
//!
//! Every error is fatal to the run: the pipeline stops at the first one and the
//! binary exits with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the load generator
#[derive(Error, Debug)]
pub enum LoadgenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] LoadgenConfigError),

    /// The gRPC channel could not be established
    #[error("failed to connect to gRPC endpoint: {0}")]
    Connect(String),

    /// A batch could not be delivered
    #[error("failed to send data: {0}")]
    Export(#[from] ExportError),

    /// The control file could not be produced
    #[error("Control file error: {0}")]
    Control(#[from] ControlFileError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum LoadgenConfigError {
    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid batch or group count
    #[error("Invalid count: {0}")]
    InvalidCount(String),

    /// Missing required configuration field
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Per-batch transmission errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// The `Export` RPC returned a non-OK status
    #[error("gRPC export failed: {0}")]
    Rpc(String),

    /// The HTTP request could not be sent or its response read
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The HTTP endpoint answered with something other than 200 or 204
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Protobuf encoding failed
    #[error("failed to marshal data: {0}")]
    Encode(String),
}

/// Control file errors
#[derive(Error, Debug)]
pub enum ControlFileError {
    /// JSON serialization or deserialization failed
    #[error("failed to marshal control file: {0}")]
    Serialize(String),

    /// Writing the control file failed
    #[error("failed to write control file {}: {reason}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Reading a control file back failed
    #[error("failed to read control file {}: {reason}", .path.display())]
    Read {
        /// Source path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },
}

impl From<tonic::Status> for ExportError {
    fn from(status: tonic::Status) -> Self {
        ExportError::Rpc(format!("{:?}: {}", status.code(), status.message()))
    }
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        ExportError::Transport(err.to_string())
    }
}
