//! Area Calculator SDK
//!
//! This crate provides everything needed to consume or host the area calculator service:
//! - Wire model (`ShapeMessage`, `AreaRequest`, `AreaResponse`) generated from protobuf
//! - Shape constructors and the `kind=dims` text form (`"rectangle=3,4"`)
//! - API trait (`AreaCalculatorClientV1`) and error type (`AreaCalculatorError`)
//! - gRPC client with connect/call retries (`AreaCalculatorGrpcClient`)
//!
//! ## Usage
//!
//! ```ignore
//! use area_calculator_sdk::{AreaCalculatorClientV1, AreaCalculatorGrpcClient, GrpcClientConfig, ShapeMessage};
//!
//! let cfg = GrpcClientConfig::new("my-consumer");
//! let client = AreaCalculatorGrpcClient::connect("http://127.0.0.1:50051", cfg).await?;
//! let response = client.calculate_one(ShapeMessage::rectangle(3.0, 4.0)).await?;
//! assert_eq!(response.value, vec![12.0]);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
pub use api::{AreaCalculatorClientV1, AreaCalculatorError};

// === GRPC CLIENT ===
mod client;
pub use client::{AreaCalculatorGrpcClient, GrpcClientConfig};

// === SHAPE HELPERS ===
mod shapes;
pub use shapes::ShapeParseError;

// === GRPC PROTO STUBS ===
/// Generated protobuf types for the `Calculator` service
#[allow(clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("area_calculator.v1");
}

pub use proto::calculator_server::{Calculator, CalculatorServer};
pub use proto::shape_message::Shape;
pub use proto::{
    AreaRequest, AreaResponse, Circle, Parallelogram, Rectangle, ShapeMessage, Square, Triangle,
};

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "area_calculator.v1.Calculator";
