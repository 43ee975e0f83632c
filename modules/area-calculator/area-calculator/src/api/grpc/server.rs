//! gRPC Server implementation for the area calculator
//!
//! The server implementation handles gRPC requests and delegates
//! to the domain Service for the area logic.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use area_calculator_sdk::{AreaRequest, AreaResponse, Calculator, CalculatorServer, ShapeMessage};

use crate::domain::{DomainError, Service};

/// gRPC service implementation that wraps the domain Service.
#[derive(Clone)]
pub struct CalculatorServiceImpl {
    service: Arc<Service>,
}

impl CalculatorServiceImpl {
    /// Create a new `CalculatorServiceImpl` with the given Service.
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

/// Wrap `service` into the tonic server type ready for `add_service`.
#[must_use]
pub fn calculator_server(service: Arc<Service>) -> CalculatorServer<CalculatorServiceImpl> {
    CalculatorServer::new(CalculatorServiceImpl::new(service))
}

fn map_domain_error(err: &DomainError) -> Status {
    match err {
        DomainError::UnrecognizedShape => {
            Status::invalid_argument("Invalid request: Not a valid shape")
        }
    }
}

#[tonic::async_trait]
impl Calculator for CalculatorServiceImpl {
    async fn calculate_one(
        &self,
        request: Request<ShapeMessage>,
    ) -> Result<Response<AreaResponse>, Status> {
        tracing::info!("Calculating the area for one shape");
        let shape = request.into_inner();

        let response = self.service.calculate_one(&shape).map_err(|e| {
            tracing::warn!(error = %e, "rejecting CalculateOne request");
            map_domain_error(&e)
        })?;

        Ok(Response::new(response))
    }

    async fn calculate_multi(
        &self,
        request: Request<AreaRequest>,
    ) -> Result<Response<AreaResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(count = req.shapes.len(), "Calculating the area for multiple shapes");

        let response = self.service.calculate_multi(&req).map_err(|e| {
            tracing::warn!(error = %e, "rejecting CalculateMulti request");
            map_domain_error(&e)
        })?;

        Ok(Response::new(response))
    }
}
