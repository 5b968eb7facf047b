//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// Widest register an exact statevector simulator may be configured for.
///
/// 2^30 amplitudes is 16 GiB; anything wider cannot be allocated.
pub const SIMULATOR_QUBIT_LIMIT: u32 = 30;

/// What a backend can execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate names.
    pub gate_set: Vec<String>,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for an exact statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: ["h", "x", "mcx"].map(String::from).to_vec(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "noiseless".into()],
        }
    }

    /// Check whether a gate name is supported.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.iter().any(|g| g == name)
    }
}
