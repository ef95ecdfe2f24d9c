//! Mock service module
//!
//! Provides a mock OTLP logs collector for exercising the gRPC transport.

pub mod service;

pub use service::MockLogsCollector;
