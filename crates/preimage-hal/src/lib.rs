//! Execution backend abstraction
//!
//! This crate defines the boundary between the Grover search core and
//! whatever executes its circuits.
//!
//! # Overview
//!
//! - A common [`Backend`] trait: one `run()` call per circuit, returning a
//!   complete histogram
//! - [`Capabilities`] to describe what a backend can execute
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use preimage_hal::{Backend, Capabilities, ExecutionResult, HalResult};
//! use preimage_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         // Execute and sample
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, SIMULATOR_QUBIT_LIMIT};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
