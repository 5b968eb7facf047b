//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate together with the qubits it acts on.
///
/// For multi-controlled gates the controls come first and the target last.
/// The operand list always matches the gate, including after deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction")]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Qubits this instruction operates on.
    qubits: Vec<QubitId>,
}

#[derive(Deserialize)]
struct RawInstruction {
    gate: StandardGate,
    qubits: Vec<QubitId>,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = IrError;

    fn try_from(raw: RawInstruction) -> IrResult<Self> {
        Self::gate(raw.gate, raw.qubits)
    }
}

impl Instruction {
    /// Create a gate instruction, checking operand count and uniqueness.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().into(),
                expected: gate.num_qubits(),
                got: u32::try_from(qubits.len()).unwrap_or(u32::MAX),
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(gate.name().into()),
                });
            }
        }
        Ok(Self { gate, qubits })
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> IrResult<Self> {
        Self::gate(gate, [qubit])
    }

    /// Create a multi-controlled X instruction.
    pub fn mcx(controls: &[QubitId], target: QubitId) -> IrResult<Self> {
        let gate = StandardGate::Mcx {
            num_controls: controls.len() as u32,
        };
        Self::gate(gate, controls.iter().copied().chain([target]))
    }

    /// All operands, target last.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Control qubits (empty for uncontrolled gates).
    pub fn controls(&self) -> &[QubitId] {
        match self.gate {
            StandardGate::Mcx { .. } => &self.qubits[..self.qubits.len() - 1],
            StandardGate::H | StandardGate::X => &[],
        }
    }

    /// The qubit the gate acts on (the last operand).
    pub fn target(&self) -> QubitId {
        self.qubits[self.qubits.len() - 1]
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0)).unwrap();
        assert_eq!(inst.qubits().len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.controls().is_empty());
        assert_eq!(inst.target(), QubitId(0));
    }

    #[test]
    fn test_mcx_operand_order() {
        let inst = Instruction::mcx(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap();
        assert_eq!(inst.controls(), &[QubitId(0), QubitId(1)]);
        assert_eq!(inst.target(), QubitId(2));
        assert_eq!(inst.gate, StandardGate::Mcx { num_controls: 2 });
    }

    #[test]
    fn test_mcx_without_controls() {
        let inst = Instruction::mcx(&[], QubitId(0)).unwrap();
        assert!(inst.controls().is_empty());
        assert_eq!(inst.qubits(), &[QubitId(0)]);
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let err = Instruction::mcx(&[QubitId(1)], QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_deserialize_checks_operands() {
        let inst = Instruction::mcx(&[QubitId(0)], QubitId(1)).unwrap();
        let json = serde_json::to_value(&inst).unwrap();
        let back: Instruction = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, inst);

        let mut empty = json.clone();
        empty["qubits"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Instruction>(empty).is_err());

        let mut repeated = json;
        repeated["qubits"] = serde_json::json!([1, 1]);
        assert!(serde_json::from_value::<Instruction>(repeated).is_err());
    }

    #[test]
    fn test_operand_count_checked() {
        let err = Instruction::gate(StandardGate::H, [QubitId(0), QubitId(1)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 1,
                got: 2,
                ..
            }
        ));
    }
}
