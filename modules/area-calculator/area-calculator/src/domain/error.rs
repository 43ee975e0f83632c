use area_calculator_sdk::AreaCalculatorError;
use thiserror::Error;

/// Domain-specific errors for the area calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The message carries no shape variant known to this build.
    #[error("not a valid shape")]
    UnrecognizedShape,
}

impl From<DomainError> for AreaCalculatorError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnrecognizedShape => AreaCalculatorError::InvalidShape(err.to_string()),
        }
    }
}
