//! Domain layer for the area calculator module
//!
//! Contains the area formulas and the single/batch calculation logic.

pub mod error;
pub mod evaluator;
pub mod service;

pub use error::DomainError;
pub use evaluator::compute_area;
pub use service::Service;
