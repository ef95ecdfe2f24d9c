//! OpenTelemetry Protocol (OTLP) log generation module
//!
//! Provides batch generation, gRPC and HTTP export, and control file persistence.

pub mod body;
pub mod control;
pub mod exporter;
pub mod generator;
pub mod grpc;
pub mod http;
pub mod pipeline;
pub mod severity;

pub use body::{BodySource, LoremSentences};
pub use control::ControlAccumulator;
pub use exporter::{LogExporter, Transport};
pub use generator::{GeneratorSettings, LogBatchGenerator};
pub use grpc::GrpcLogExporter;
pub use http::HttpLogExporter;
pub use pipeline::{RunSummary, run};
pub use severity::{DEFAULT_SEVERITIES, Severity};
