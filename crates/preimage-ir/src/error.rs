//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the declared register.
    #[error("Qubit {qubit} not found in {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Two circuits (or a circuit and a register) disagree on width.
    #[error("Width mismatch: expected {expected} qubits, got {got}")]
    WidthMismatch {
        /// Expected width.
        expected: u32,
        /// Actual width.
        got: u32,
    },

    /// A bit-string contained something other than '0' and '1'.
    #[error("Invalid bit-string '{value}': {reason}")]
    InvalidBitstring {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Operations cannot follow the terminal measurement.
    #[error("Circuit '{0}' is already measured; no further operations may be appended")]
    AlreadyMeasured(String),

    /// A register must hold at least one qubit.
    #[error("Register must contain at least one qubit")]
    EmptyRegister,

    /// The basis index space 2^n no longer fits the host word.
    #[error("Register of {0} qubits is too wide to index")]
    RegisterTooWide(u32),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
