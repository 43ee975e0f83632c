//! Area formulas for each shape variant.
//!
//! Dimensions are not validated. Negative or zero inputs give non-physical
//! results and a triangle that violates the triangle inequality gives `NaN`;
//! both are returned as ordinary values.

use std::f32::consts::PI;

use area_calculator_sdk::{Shape, ShapeMessage};

use super::DomainError;

/// Compute the area of `shape`.
///
/// # Errors
/// Returns `DomainError::UnrecognizedShape` when no known variant is set.
pub fn compute_area(shape: &ShapeMessage) -> Result<f32, DomainError> {
    let area = match shape.shape.as_ref() {
        Some(Shape::Square(square)) => square.edge_length * square.edge_length,
        Some(Shape::Rectangle(rect)) => rect.length * rect.width,
        Some(Shape::Circle(circle)) => PI * circle.radius * circle.radius,
        Some(Shape::Triangle(tri)) => heron(tri.edge_a, tri.edge_b, tri.edge_c),
        Some(Shape::Parallelogram(para)) => para.base_length * para.height,
        None => return Err(DomainError::UnrecognizedShape),
    };
    Ok(area)
}

fn heron(edge_a: f32, edge_b: f32, edge_c: f32) -> f32 {
    let semi = (edge_a + edge_b + edge_c) / 2.0;
    (semi * (semi - edge_a) * (semi - edge_b) * (semi - edge_c)).sqrt()
}
