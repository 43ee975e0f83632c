//! Area calculator API trait and types
//!
//! Contract trait and error type shared by the gRPC client and in-process clients.

use std::error::Error as StdError;

use async_trait::async_trait;
use tonic::TimeoutExpired;
use tonic::{Code, Status};

use crate::proto::{AreaResponse, ShapeMessage};

/// Area calculator API trait
///
/// Both operations are idempotent and side-effect free, so callers may retry them.
#[async_trait]
pub trait AreaCalculatorClientV1: Send + Sync {
    /// Compute the area of one shape. The response holds exactly one value.
    ///
    /// # Errors
    /// `InvalidShape` if no known variant is set, transport errors otherwise.
    async fn calculate_one(
        &self,
        shape: ShapeMessage,
    ) -> Result<AreaResponse, AreaCalculatorError>;

    /// Compute the areas of `shapes`, in input order.
    ///
    /// # Errors
    /// Fails as a whole with `InvalidShape` if any shape is invalid; no partial
    /// result is returned.
    async fn calculate_multi(
        &self,
        shapes: Vec<ShapeMessage>,
    ) -> Result<AreaResponse, AreaCalculatorError>;
}

/// Error type for area calculator operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AreaCalculatorError {
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("deadline exceeded: {0}")]
    Timeout(String),

    #[error("gRPC transport error: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// True when the call ran out of time, whether the server reported
/// `DEADLINE_EXCEEDED` or the client-side `Endpoint::timeout` fired (tonic surfaces
/// the latter as `CANCELLED` with a `TimeoutExpired` source).
pub fn is_deadline_exceeded(status: &Status) -> bool {
    if status.code() == Code::DeadlineExceeded {
        return true;
    }
    let first = status.source().map(|e| e as &(dyn StdError + 'static));
    std::iter::successors(first, |&e| e.source()).any(|e| e.is::<TimeoutExpired>())
}

impl From<Status> for AreaCalculatorError {
    fn from(status: Status) -> Self {
        let message = status.message().to_owned();
        if is_deadline_exceeded(&status) {
            return Self::Timeout(message);
        }
        match status.code() {
            Code::InvalidArgument => Self::InvalidShape(message),
            code => Self::Transport(format!("{code}: {message}")),
        }
    }
}
