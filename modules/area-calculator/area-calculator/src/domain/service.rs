//! Domain service for the area calculator
//!
//! Wraps the evaluator into the single-shape and batch operations.

use area_calculator_sdk::{AreaRequest, AreaResponse, ShapeMessage};
use tracing::debug;

use super::{DomainError, compute_area};

/// Domain service that computes shape areas.
///
/// Stateless; one instance is built at startup and shared by the gRPC server
/// and the local client.
#[derive(Clone, Default)]
pub struct Service;

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the area of one shape as a one-element response.
    ///
    /// # Errors
    /// Returns `DomainError::UnrecognizedShape` if the shape has no known variant.
    pub fn calculate_one(&self, shape: &ShapeMessage) -> Result<AreaResponse, DomainError> {
        debug!(shape = %shape, "calculating area for one shape");
        let area = compute_area(shape)?;
        Ok(AreaResponse { value: vec![area] })
    }

    /// Compute the areas of every shape in `request`, preserving order.
    ///
    /// # Errors
    /// Returns `DomainError::UnrecognizedShape` on the first invalid shape; the
    /// areas computed before it are discarded.
    pub fn calculate_multi(&self, request: &AreaRequest) -> Result<AreaResponse, DomainError> {
        debug!(count = request.shapes.len(), "calculating areas for multiple shapes");
        let value = request
            .shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                compute_area(shape).inspect_err(|_| {
                    debug!(index, "rejecting batch on invalid shape");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AreaResponse { value })
    }
}
