//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{QubitId, register};

/// A quantum circuit: an ordered gate sequence over a fixed register, plus an
/// optional terminal measure-all marker.
///
/// Circuits are plain values. [`Circuit::append`] copies the other circuit's
/// instructions, so a sub-circuit can be appended any number of times and
/// stays unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register width.
    num_qubits: u32,
    /// Gate sequence, in application order.
    instructions: Vec<Instruction>,
    /// Whether every qubit is measured after the last instruction.
    measured: bool,
}

#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    instructions: Vec<Instruction>,
    measured: bool,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(raw.name, raw.num_qubits);
        for instruction in raw.instructions {
            circuit.push(instruction)?;
        }
        circuit.measured = raw.measured;
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
            measured: false,
        }
    }

    fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        if self.measured {
            return Err(IrError::AlreadyMeasured(self.name.clone()));
        }
        for &qubit in instruction.qubits() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(instruction.name().into()),
                });
            }
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit)?)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit)?)
    }

    /// Apply multi-controlled X.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::mcx(controls, target)?)
    }

    /// Apply a multi-controlled phase flip as `H(target) · MCX · H(target)`.
    ///
    /// Flips the sign of exactly the basis states where every control and the
    /// target are |1⟩. With no controls this is `H·X·H = Z`.
    pub fn mcz(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.h(target)?.mcx(controls, target)?.h(target)
    }

    /// Apply Hadamard to every qubit.
    pub fn h_all(&mut self) -> IrResult<&mut Self> {
        for q in register(self.num_qubits) {
            self.h(q)?;
        }
        Ok(self)
    }

    /// Apply Pauli-X to every qubit.
    pub fn x_all(&mut self) -> IrResult<&mut Self> {
        for q in register(self.num_qubits) {
            self.x(q)?;
        }
        Ok(self)
    }

    /// Append a copy of `other`'s gate sequence.
    ///
    /// Both circuits must have the same width. If `other` carries a measure
    /// marker it is not propagated; measurement is only ever terminal.
    pub fn append(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        if self.measured {
            return Err(IrError::AlreadyMeasured(self.name.clone()));
        }
        self.instructions.extend(other.instructions.iter().cloned());
        Ok(self)
    }

    /// Mark every qubit for measurement at the end of the circuit.
    pub fn measure_all(&mut self) -> &mut Self {
        self.measured = true;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Gate sequence in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Whether the terminal measure-all marker is set.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Get the circuit depth (gate layers, measurement excluded).
    pub fn depth(&self) -> usize {
        let mut wire_depth = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let layer = inst
                .qubits()
                .iter()
                .map(|q| wire_depth[q.0 as usize])
                .max()
                .unwrap_or(0)
                + 1;
            for q in inst.qubits() {
                wire_depth[q.0 as usize] = layer;
            }
        }
        wire_depth.into_iter().max().unwrap_or(0)
    }

    /// Number of instructions per gate name.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_default() += 1;
        }
        counts
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit {} ({} qubits)", self.name, self.num_qubits)?;
        for inst in &self.instructions {
            let operands: Vec<_> = inst.qubits().iter().map(ToString::to_string).collect();
            writeln!(f, "  {} {};", inst.name(), operands.join(", "))?;
        }
        if self.measured {
            writeln!(f, "  measure all;")?;
        }
        Ok(())
    }
}
