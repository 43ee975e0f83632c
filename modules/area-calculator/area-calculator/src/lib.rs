//! Area Calculator Module
//!
//! gRPC service that computes the areas of geometric shapes, one at a time or in
//! all-or-nothing batches.
//!
//! ## Architecture
//!
//! - `domain/evaluator.rs` - Pure area formulas per shape variant
//! - `domain/service.rs` - Single and batch calculation over the evaluator
//! - `api/grpc/server.rs` - gRPC server implementation
//! - `local_client.rs` - In-process implementation of the SDK client trait
//! - `config.rs`, `logging.rs`, `host.rs` - Process bootstrap and serve loop
//!
//! External consumers should use the `area-calculator-sdk` crate which provides
//! the wire types and the gRPC client.

#![forbid(unsafe_code)]

pub mod config;
pub mod host;
pub mod logging;

mod local_client;
pub use local_client::LocalAreaCalculatorClient;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
