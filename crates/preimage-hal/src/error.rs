//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
///
/// Callers treat these as opaque: they are forwarded, not interpreted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Circuit model error surfaced while executing.
    #[error("Circuit error: {0}")]
    Ir(#[from] preimage_ir::IrError),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
