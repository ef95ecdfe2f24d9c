//! Integration tests for the OTLP/HTTP protobuf transport

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use otlp_log_loadgen::otlp::{LogBatchGenerator, LoremSentences, Transport, run};
use otlp_log_loadgen::{ConfigBuilder, ExportError, LoadgenError, TransportProtocol};
use prost::Message;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_config(server: &MockServer) -> otlp_log_loadgen::Config {
    ConfigBuilder::new()
        .protocol(TransportProtocol::Http)
        .endpoint(format!("{}/v1/logs", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_http_run_posts_one_protobuf_body_per_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/logs"))
        .and(header("content-type", "application/x-protobuf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(10)
        .mount(&server)
        .await;

    let config = http_config(&server);
    let mut transport = Transport::connect(&config).await.unwrap();
    let mut generator =
        LogBatchGenerator::new((&config).into(), LoremSentences::default()).unwrap();

    let summary = run(&config, &mut generator, &mut transport).await.unwrap();
    assert_eq!(summary.total_lines, 20);
    assert_eq!(summary.endpoint, config.endpoint);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 10);
    for request in &received {
        let batch = ExportLogsServiceRequest::decode(request.body.as_slice()).unwrap();
        assert_eq!(batch.resource_logs.len(), 2);
    }
}

#[tokio::test]
async fn test_http_no_content_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = http_config(&server);
    let mut transport = Transport::connect(&config).await.unwrap();
    let mut generator =
        LogBatchGenerator::new((&config).into(), LoremSentences::default()).unwrap();

    assert!(run(&config, &mut generator, &mut transport).await.is_ok());
}

#[tokio::test]
async fn test_http_accepted_is_not_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let config = http_config(&server);
    let mut transport = Transport::connect(&config).await.unwrap();
    let mut generator =
        LogBatchGenerator::new((&config).into(), LoremSentences::default()).unwrap();

    let err = run(&config, &mut generator, &mut transport).await.unwrap_err();
    assert!(matches!(
        err,
        LoadgenError::Export(ExportError::UnexpectedStatus(202))
    ));
}

#[tokio::test]
async fn test_http_500_on_second_post_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let control_path = temp_dir.path().join("control.json");
    let config = ConfigBuilder::new()
        .protocol(TransportProtocol::Http)
        .endpoint(format!("{}/v1/logs", server.uri()))
        .control_file(&control_path)
        .build()
        .unwrap();
    let mut transport = Transport::connect(&config).await.unwrap();
    let mut generator =
        LogBatchGenerator::new((&config).into(), LoremSentences::default()).unwrap();

    let err = run(&config, &mut generator, &mut transport).await.unwrap_err();

    assert!(matches!(
        err,
        LoadgenError::Export(ExportError::UnexpectedStatus(500))
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert!(!control_path.exists());
}

#[tokio::test]
async fn test_http_unreachable_endpoint_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ConfigBuilder::new()
        .protocol(TransportProtocol::Http)
        .endpoint(format!("http://{}/v1/logs", addr))
        .build()
        .unwrap();
    let mut transport = Transport::connect(&config).await.unwrap();
    let mut generator =
        LogBatchGenerator::new((&config).into(), LoremSentences::default()).unwrap();

    let err = run(&config, &mut generator, &mut transport).await.unwrap_err();
    assert!(matches!(err, LoadgenError::Export(ExportError::Transport(_))));
}
