//! In-process `AreaCalculatorClientV1` implementation
//!
//! Calls the domain service directly, without a gRPC hop. Useful for embedding the
//! calculator in another process and for tests that should not bind a port.

use std::sync::Arc;

use async_trait::async_trait;

use area_calculator_sdk::{
    AreaCalculatorClientV1, AreaCalculatorError, AreaRequest, AreaResponse, ShapeMessage,
};

use crate::domain::Service;

/// Local client backed by a shared domain `Service`.
#[derive(Clone)]
pub struct LocalAreaCalculatorClient {
    service: Arc<Service>,
}

impl LocalAreaCalculatorClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AreaCalculatorClientV1 for LocalAreaCalculatorClient {
    async fn calculate_one(
        &self,
        shape: ShapeMessage,
    ) -> Result<AreaResponse, AreaCalculatorError> {
        self.service.calculate_one(&shape).map_err(Into::into)
    }

    async fn calculate_multi(
        &self,
        shapes: Vec<ShapeMessage>,
    ) -> Result<AreaResponse, AreaCalculatorError> {
        self.service
            .calculate_multi(&AreaRequest { shapes })
            .map_err(Into::into)
    }
}
