//! Retry and deadline behaviour of `AreaCalculatorGrpcClient` against stub peers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use area_calculator_sdk::{
    AreaCalculatorClientV1, AreaCalculatorError, AreaCalculatorGrpcClient, AreaRequest,
    AreaResponse, Calculator, CalculatorServer, GrpcClientConfig, ShapeMessage,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Code, Request, Response, Status};

/// Fails the first `failures` calls with `code`, then answers `1.0` per shape.
#[derive(Clone)]
struct FlakyCalculator {
    calls: Arc<AtomicUsize>,
    failures: usize,
    code: Code,
}

impl FlakyCalculator {
    fn new(failures: usize, code: Code) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            failures,
            code,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, shapes: usize) -> Result<Response<AreaResponse>, Status> {
        let seen = self.calls.fetch_add(1, Ordering::SeqCst);
        if seen < self.failures {
            return Err(Status::new(self.code, "injected failure"));
        }
        Ok(Response::new(AreaResponse {
            value: vec![1.0; shapes],
        }))
    }
}

#[tonic::async_trait]
impl Calculator for FlakyCalculator {
    async fn calculate_one(
        &self,
        _request: Request<ShapeMessage>,
    ) -> Result<Response<AreaResponse>, Status> {
        self.answer(1)
    }

    async fn calculate_multi(
        &self,
        request: Request<AreaRequest>,
    ) -> Result<Response<AreaResponse>, Status> {
        self.answer(request.into_inner().shapes.len())
    }
}

async fn start(stub: FlakyCalculator) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        Server::builder()
            .add_service(CalculatorServer::new(stub))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    format!("http://{addr}")
}

fn config(max_retries: u32) -> GrpcClientConfig {
    GrpcClientConfig::new("client_retry_test")
        .with_connect_timeout(Duration::from_secs(2))
        .with_rpc_timeout(Duration::from_secs(5))
        .with_max_retries(max_retries)
        .with_base_backoff(Duration::from_millis(5))
}

#[tokio::test]
async fn unavailable_calls_are_resent_until_success() {
    let stub = FlakyCalculator::new(2, Code::Unavailable);
    let uri = start(stub.clone()).await;
    let client = AreaCalculatorGrpcClient::connect(uri, config(3))
        .await
        .unwrap();

    let response = client
        .calculate_multi(vec![ShapeMessage::square(1.0), ShapeMessage::circle(1.0)])
        .await
        .unwrap();

    assert_eq!(response.value.len(), 2);
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn invalid_argument_is_sent_exactly_once() {
    let stub = FlakyCalculator::new(usize::MAX, Code::InvalidArgument);
    let uri = start(stub.clone()).await;
    let client = AreaCalculatorGrpcClient::connect(uri, config(3))
        .await
        .unwrap();

    let err = client
        .calculate_one(ShapeMessage::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AreaCalculatorError::InvalidShape(_)));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn retries_stop_after_max_retries() {
    let stub = FlakyCalculator::new(usize::MAX, Code::Unavailable);
    let uri = start(stub.clone()).await;
    let client = AreaCalculatorGrpcClient::connect(uri, config(2))
        .await
        .unwrap();

    let err = client
        .calculate_one(ShapeMessage::square(2.0))
        .await
        .unwrap_err();

    assert!(matches!(err, AreaCalculatorError::Transport(_)));
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn expired_rpc_timeout_is_reported_as_timeout_and_retried() {
    // Accepts TCP connections and holds them open without ever speaking HTTP/2.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let rpc_timeout = Duration::from_millis(200);
    let cfg = GrpcClientConfig::new("client_retry_test")
        .with_connect_timeout(Duration::from_secs(2))
        .with_rpc_timeout(rpc_timeout)
        .with_max_retries(1)
        .with_base_backoff(Duration::from_millis(5));
    let client = AreaCalculatorGrpcClient::connect(format!("http://{addr}"), cfg)
        .await
        .unwrap();

    let started = Instant::now();
    let err = client
        .calculate_one(ShapeMessage::square(3.0))
        .await
        .unwrap_err();

    assert!(
        matches!(err, AreaCalculatorError::Timeout(_)),
        "expected Timeout, got {err:?}"
    );
    assert!(
        started.elapsed() >= rpc_timeout * 2,
        "expected one retry after the first deadline, finished in {:?}",
        started.elapsed()
    );
}
