//! Gate types.

use serde::{Deserialize, Serialize};

/// Gates understood by every backend in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Multi-controlled X: flips the last operand when every control is |1⟩.
    ///
    /// With zero controls this is a plain X.
    Mcx {
        /// Number of control qubits preceding the target.
        num_controls: u32,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Mcx { .. } => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X => 1,
            StandardGate::Mcx { num_controls } => num_controls.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::X.num_qubits(), 1);
        assert_eq!(StandardGate::Mcx { num_controls: 0 }.num_qubits(), 1);
        assert_eq!(StandardGate::Mcx { num_controls: 4 }.num_qubits(), 5);
        assert_eq!(StandardGate::Mcx { num_controls: 2 }.name(), "mcx");
    }

    #[test]
    fn test_gate_serde_tag() {
        let json = serde_json::to_string(&StandardGate::Mcx { num_controls: 2 }).unwrap();
        assert_eq!(json, r#"{"gate":"mcx","num_controls":2}"#);
    }
}
