//! Circuit model for Grover pre-image search
//!
//! This crate provides the gate-sequence representation shared by the search
//! builders and the execution backends.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit in a register of fixed width
//! - **Bit-strings**: [`Bitstring`] for secrets and measured outcomes, with one
//!   bit-ordering convention (rightmost character = qubit 0)
//! - **Gates**: [`StandardGate`] (H, X, multi-controlled X)
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Circuit**: [`Circuit`] ordered gate sequence plus a terminal
//!   measure-all marker
//!
//! # Example: Marking |11⟩
//!
//! ```rust
//! use preimage_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("mark_11", 2);
//! circuit.h_all().unwrap();
//! circuit.mcz(&[QubitId(0)], QubitId(1)).unwrap();
//! circuit.measure_all();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 5); // h, h, h, mcx, h
//! ```

pub mod bitstring;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use bitstring::{Bitstring, MAX_WIDTH};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::Instruction;
pub use qubit::{QubitId, register};
