//! gRPC API layer for the area calculator module

pub mod server;

pub use server::{CalculatorServiceImpl, calculator_server};
