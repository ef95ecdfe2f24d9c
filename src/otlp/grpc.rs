//! OTLP gRPC transport

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::logs::v1::logs_service_client::LogsServiceClient;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

use crate::error::{ExportError, LoadgenError};
use crate::otlp::exporter::LogExporter;

/// Calls `LogsService/Export` over a plaintext channel
#[derive(Debug, Clone)]
pub struct GrpcLogExporter {
    endpoint: String,
    client: LogsServiceClient<Channel>,
}

impl GrpcLogExporter {
    /// Dial `endpoint` and keep the channel for the whole run
    pub async fn connect(endpoint: &str) -> Result<Self, LoadgenError> {
        let uri = grpc_uri(endpoint);
        let channel = Endpoint::from_shared(uri.clone())
            .map_err(|e| LoadgenError::Connect(format!("invalid endpoint {}: {}", uri, e)))?
            .connect()
            .await
            .map_err(|e| LoadgenError::Connect(format!("{}: {}", uri, e)))?;

        debug!(uri = %uri, "Connected gRPC channel");

        Ok(Self {
            endpoint: endpoint.to_string(),
            client: LogsServiceClient::new(channel),
        })
    }
}

impl LogExporter for GrpcLogExporter {
    async fn export(&mut self, batch: ExportLogsServiceRequest) -> Result<(), LoadgenError> {
        let response = self
            .client
            .export(batch)
            .await
            .map_err(ExportError::from)?
            .into_inner();

        if let Some(partial) = response.partial_success {
            if partial.rejected_log_records > 0 {
                warn!(
                    rejected_log_records = partial.rejected_log_records,
                    error_message = %partial.error_message,
                    "Endpoint reported partial success"
                );
            }
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// gRPC targets are given as `host:port`; tonic needs a URI.
pub(crate) fn grpc_uri(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}
