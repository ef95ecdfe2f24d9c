//! Mock OTLP logs collector for testing
//!
//! Serves `LogsService/Export` on an ephemeral loopback port and records every
//! request it accepts. It can be told to fail a given call so fatal-error paths
//! can be exercised end to end.

use opentelemetry_proto::tonic::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse,
    logs_service_server::{LogsService, LogsServiceServer},
};
use opentelemetry_proto::tonic::logs::v1::ResourceLogs;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};
use tracing::{error, info};

/// Mock collector state
#[derive(Debug, Default)]
struct MockCollectorState {
    /// Requests accepted, in arrival order
    received: Vec<ExportLogsServiceRequest>,
    /// Count of gRPC calls received, including failed ones
    grpc_calls: u64,
    /// 1-based call number to answer with `UNAVAILABLE`
    fail_on_call: Option<u64>,
}

/// Mock OTLP logs collector for testing
#[derive(Debug, Clone)]
pub struct MockLogsCollector {
    state: Arc<RwLock<MockCollectorState>>,
}

impl MockLogsCollector {
    /// Create a new mock collector
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockCollectorState::default())),
        }
    }

    /// Answer the `call`-th export (1-based) with an error status
    pub async fn fail_on_call(&self, call: u64) {
        self.state.write().await.fail_on_call = Some(call);
    }

    /// Start serving in the background and return the `host:port` target
    pub async fn start(&self) -> Result<String, String> {
        let addr = "127.0.0.1:0"
            .parse::<SocketAddr>()
            .map_err(|e| format!("Failed to parse address: {}", e))?;
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind listener: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to get local address: {}", e))?;

        let logs_service = MockLogsServiceImpl {
            state: self.state.clone(),
        };
        tokio::spawn(async move {
            let server = tonic::transport::Server::builder()
                .add_service(LogsServiceServer::new(logs_service))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await;

            if let Err(e) = server {
                error!(error = %e, "Mock collector server error");
            }
        });

        info!(addr = %addr, "Mock OTLP logs collector started");
        Ok(addr.to_string())
    }

    /// Accepted requests, in arrival order
    pub async fn received_requests(&self) -> Vec<ExportLogsServiceRequest> {
        self.state.read().await.received.clone()
    }

    /// All accepted resource-log groups, flattened in arrival order
    pub async fn received_resource_logs(&self) -> Vec<ResourceLogs> {
        let state = self.state.read().await;
        state
            .received
            .iter()
            .flat_map(|req| req.resource_logs.iter().cloned())
            .collect()
    }

    /// Assert that the expected number of batches were accepted
    pub async fn assert_batches_received(&self, expected_count: usize) -> Result<(), String> {
        let state = self.state.read().await;
        if state.received.len() != expected_count {
            Err(format!(
                "Expected {} batches, but received {}",
                expected_count,
                state.received.len()
            ))
        } else {
            Ok(())
        }
    }

    /// Get the number of gRPC calls received
    pub async fn grpc_calls_count(&self) -> u64 {
        self.state.read().await.grpc_calls
    }

    /// Reset the mock collector state (for test isolation)
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = MockCollectorState::default();
    }
}

impl Default for MockLogsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock Logs Service implementation
#[derive(Debug, Clone)]
struct MockLogsServiceImpl {
    state: Arc<RwLock<MockCollectorState>>,
}

#[tonic::async_trait]
impl LogsService for MockLogsServiceImpl {
    async fn export(
        &self,
        request: Request<ExportLogsServiceRequest>,
    ) -> Result<Response<ExportLogsServiceResponse>, Status> {
        let req = request.into_inner();

        let mut state = self.state.write().await;
        state.grpc_calls += 1;
        if state.fail_on_call == Some(state.grpc_calls) {
            return Err(Status::unavailable("mock collector failure"));
        }
        state.received.push(req);

        Ok(Response::new(ExportLogsServiceResponse {
            partial_success: None,
        }))
    }
}
