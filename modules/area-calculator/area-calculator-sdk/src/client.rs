//! gRPC client implementation of `AreaCalculatorClientV1`
//!
//! Connection establishment and unary calls are both retried with linear backoff
//! capped at `max_backoff`. Calls are retried only on `UNAVAILABLE` and on an
//! expired deadline; both service operations are idempotent.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::Instrument;

use crate::SERVICE_NAME;
use crate::api::{AreaCalculatorClientV1, AreaCalculatorError, is_deadline_exceeded};
use crate::proto::calculator_client::CalculatorClient;
use crate::proto::{AreaRequest, AreaResponse, ShapeMessage};

fn duration_to_u64_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Transport and retry settings for [`AreaCalculatorGrpcClient`].
#[derive(Debug, Clone)]
#[must_use]
pub struct GrpcClientConfig {
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,

    /// Deadline applied to every RPC.
    pub rpc_timeout: Duration,

    /// Retry attempts after the first one, for both connect and calls.
    pub max_retries: u32,

    /// Backoff step; attempt `n` waits `base_backoff * n`.
    pub base_backoff: Duration,

    /// Upper bound for a single backoff.
    pub max_backoff: Duration,

    /// Name used in tracing fields.
    pub service_name: &'static str,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            rpc_timeout: Duration::from_secs(30),
            max_retries: 3,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            service_name: SERVICE_NAME,
        }
    }
}

impl GrpcClientConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            ..Default::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    fn backoff(&self, attempt: u32) -> Duration {
        (self.base_backoff * attempt).min(self.max_backoff)
    }
}

fn build_endpoint(
    uri: String,
    cfg: &GrpcClientConfig,
) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true);

    Ok(endpoint)
}

fn is_retryable(status: &Status) -> bool {
    status.code() == Code::Unavailable || is_deadline_exceeded(status)
}

/// gRPC client for the area calculator service.
#[derive(Clone)]
pub struct AreaCalculatorGrpcClient {
    inner: CalculatorClient<Channel>,
    cfg: GrpcClientConfig,
}

impl AreaCalculatorGrpcClient {
    /// Connect to the service at `uri` (e.g. `http://127.0.0.1:50051`).
    ///
    /// # Errors
    /// Returns `AreaCalculatorError::Internal` for a malformed URI and
    /// `AreaCalculatorError::Transport` when every connection attempt fails.
    pub async fn connect(
        uri: impl Into<String>,
        cfg: GrpcClientConfig,
    ) -> Result<Self, AreaCalculatorError> {
        let uri = uri.into();
        let endpoint = build_endpoint(uri.clone(), &cfg).map_err(|e| {
            AreaCalculatorError::Internal(format!("invalid endpoint '{uri}': {e}"))
        })?;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let span = tracing::debug_span!(
                "grpc_connect",
                service = cfg.service_name,
                uri = %uri,
                attempt
            );

            match endpoint.connect().instrument(span).await {
                Ok(channel) => {
                    tracing::info!(
                        service = cfg.service_name,
                        uri = %uri,
                        attempt,
                        "gRPC client connected"
                    );
                    return Ok(Self {
                        inner: CalculatorClient::new(channel),
                        cfg,
                    });
                }
                Err(e) if attempt <= cfg.max_retries => {
                    let backoff = cfg.backoff(attempt);
                    tracing::warn!(
                        service = cfg.service_name,
                        attempt,
                        max_retries = cfg.max_retries,
                        error = %e,
                        backoff_ms = duration_to_u64_ms(backoff),
                        "gRPC connection failed, retrying..."
                    );
                    sleep(backoff).await;
                }
                Err(e) => {
                    tracing::error!(
                        service = cfg.service_name,
                        attempt,
                        error = %e,
                        "gRPC connection failed after all retries"
                    );
                    return Err(AreaCalculatorError::Transport(format!(
                        "failed to connect to {uri} after {attempt} attempts: {e}"
                    )));
                }
            }
        }
    }

    async fn call_with_retry<Req, F, Fut>(
        &self,
        op: &'static str,
        req: Req,
        call: F,
    ) -> Result<AreaResponse, AreaCalculatorError>
    where
        Req: Clone,
        F: Fn(CalculatorClient<Channel>, Req) -> Fut,
        Fut: Future<Output = Result<tonic::Response<AreaResponse>, Status>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let span = tracing::debug_span!("grpc_call", op, attempt);

            match call(self.inner.clone(), req.clone()).instrument(span).await {
                Ok(response) => {
                    if attempt > 1 {
                        tracing::info!(op, attempt, "gRPC call succeeded after retries");
                    }
                    return Ok(response.into_inner());
                }
                Err(status) if is_retryable(&status) && attempt <= self.cfg.max_retries => {
                    let backoff = self.cfg.backoff(attempt);
                    tracing::warn!(
                        op,
                        attempt,
                        code = %status.code(),
                        message = %status.message(),
                        backoff_ms = duration_to_u64_ms(backoff),
                        "gRPC call failed, retrying..."
                    );
                    sleep(backoff).await;
                }
                Err(status) => {
                    tracing::debug!(op, attempt, code = %status.code(), "gRPC call giving up");
                    return Err(status.into());
                }
            }
        }
    }
}

#[async_trait]
impl AreaCalculatorClientV1 for AreaCalculatorGrpcClient {
    async fn calculate_one(
        &self,
        shape: ShapeMessage,
    ) -> Result<AreaResponse, AreaCalculatorError> {
        self.call_with_retry("calculator.calculate_one", shape, |mut c, r| async move {
            c.calculate_one(r).await
        })
        .await
    }

    async fn calculate_multi(
        &self,
        shapes: Vec<ShapeMessage>,
    ) -> Result<AreaResponse, AreaCalculatorError> {
        let request = AreaRequest { shapes };
        self.call_with_retry("calculator.calculate_multi", request, |mut c, r| async move {
            c.calculate_multi(r).await
        })
        .await
    }
}
