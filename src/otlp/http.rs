//! OTLP/HTTP protobuf transport

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use prost::Message;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{ExportError, LoadgenError};
use crate::otlp::exporter::LogExporter;

/// Content type of a binary OTLP/HTTP body
pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

/// POSTs each batch, binary-encoded, to a full URL
#[derive(Debug, Clone)]
pub struct HttpLogExporter {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpLogExporter {
    /// Create an exporter for `endpoint` (a full `http://` or `https://` URL)
    pub fn new(endpoint: &str) -> Result<Self, LoadgenError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ExportError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl LogExporter for HttpLogExporter {
    async fn export(&mut self, batch: ExportLogsServiceRequest) -> Result<(), LoadgenError> {
        let mut buf = Vec::with_capacity(batch.encoded_len());
        batch
            .encode(&mut buf)
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
            .body(buf)
            .send()
            .await
            .map_err(ExportError::from)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                debug!(status = %response.status(), "Batch accepted");
                Ok(())
            }
            status => Err(ExportError::UnexpectedStatus(status.as_u16()).into()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
