//! Batch exporters
//!
//! One export call per generated batch, no retries. The transport is picked once
//! at startup and every failure is returned to the caller as fatal.

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use tracing::info;

use crate::config::{Config, TransportProtocol};
use crate::error::LoadgenError;
use crate::otlp::grpc::GrpcLogExporter;
use crate::otlp::http::HttpLogExporter;

/// Delivers one batch to the endpoint
#[allow(async_fn_in_trait)]
pub trait LogExporter {
    /// Transmit `batch` in a single call
    async fn export(&mut self, batch: ExportLogsServiceRequest) -> Result<(), LoadgenError>;

    /// Target endpoint, as configured
    fn endpoint(&self) -> &str;
}

/// Transport selected from the run configuration
#[derive(Debug, Clone)]
pub enum Transport {
    /// OTLP gRPC
    Grpc(GrpcLogExporter),
    /// OTLP/HTTP protobuf
    Http(HttpLogExporter),
}

impl Transport {
    /// Build the configured transport.
    ///
    /// For gRPC this dials the endpoint, so an unreachable collector fails here,
    /// before any batch is generated.
    pub async fn connect(config: &Config) -> Result<Self, LoadgenError> {
        let transport = match config.protocol {
            TransportProtocol::Grpc => {
                Transport::Grpc(GrpcLogExporter::connect(&config.endpoint).await?)
            }
            TransportProtocol::Http => Transport::Http(HttpLogExporter::new(&config.endpoint)?),
        };
        info!(
            endpoint = %config.endpoint,
            protocol = ?config.protocol,
            "Transport ready"
        );
        Ok(transport)
    }
}

impl LogExporter for Transport {
    async fn export(&mut self, batch: ExportLogsServiceRequest) -> Result<(), LoadgenError> {
        match self {
            Transport::Grpc(exporter) => exporter.export(batch).await,
            Transport::Http(exporter) => exporter.export(batch).await,
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            Transport::Grpc(exporter) => exporter.endpoint(),
            Transport::Http(exporter) => exporter.endpoint(),
        }
    }
}
