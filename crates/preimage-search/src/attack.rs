//! End-to-end pre-image attack.
//!
//! ```text
//!   secret ──→ oracle ──┐
//!                       ├──→ assemble ──→ backend.run() ──→ analyze ──→ report
//!   width ──→ diffuser ─┘
//! ```
//!
//! Every stage fails fast. A failed run reports the stage that failed and
//! never a partial verdict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, instrument};

use preimage_hal::{Backend, Counts};
use preimage_ir::{Bitstring, Circuit};

use crate::analyzer::{Verdict, analyze};
use crate::assembler::{assemble, success_probability};
use crate::config::AttackConfig;
use crate::diffuser::build_diffuser;
use crate::error::{AttackError, AttackStage, StageExt};
use crate::oracle::build_oracle;

/// Structural summary of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    pub name: String,
    pub num_qubits: u32,
    pub gates: usize,
    pub depth: usize,
    /// Instruction count per gate name, sorted by name.
    pub gate_counts: BTreeMap<String, usize>,
}

impl CircuitStats {
    pub fn of(circuit: &Circuit) -> Self {
        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            gates: circuit.len(),
            depth: circuit.depth(),
            gate_counts: circuit
                .gate_counts()
                .into_iter()
                .map(|(name, count)| (name.to_string(), count))
                .collect(),
        }
    }
}

/// Full record of one attack run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackReport {
    /// The secret the oracle marked.
    pub secret: Bitstring,
    pub num_qubits: u32,
    pub iterations: u32,
    pub shots: u32,
    /// Name of the backend that executed the circuit.
    pub backend: String,
    pub circuit: CircuitStats,
    pub verdict: Verdict,
    /// Ideal probability of measuring the secret at this iteration count.
    pub theoretical_success: f64,
    /// Wall-clock time of the backend call.
    pub execution_time_ms: u64,
    pub counts: Counts,
}

/// Build the complete search circuit for `secret`.
///
/// Returns the circuit and the iteration count used.
pub fn build_search(
    num_qubits: u32,
    secret: &Bitstring,
    iterations: Option<u32>,
) -> Result<(Circuit, u32), AttackError> {
    let oracle = build_oracle(num_qubits, secret).stage(AttackStage::Oracle)?;
    let diffuser = build_diffuser(num_qubits).stage(AttackStage::Diffuser)?;
    assemble(&oracle, &diffuser, num_qubits, iterations).stage(AttackStage::Assembly)
}

/// Run one attack: resolve the secret, build and execute the search circuit
/// once, and analyze the histogram against the secret.
#[instrument(skip_all, fields(qubits = config.num_qubits, shots = config.shots, backend = backend.name()))]
pub async fn run_attack(
    config: &AttackConfig,
    backend: &dyn Backend,
) -> Result<AttackReport, AttackError> {
    config.validate().stage(AttackStage::Configuration)?;
    let secret = config.resolve_secret().stage(AttackStage::Configuration)?;
    let num_qubits = config.num_qubits;
    info!(
        "Searching {} candidates with {} qubits",
        1u64 << num_qubits,
        num_qubits
    );

    let (circuit, iterations) = build_search(num_qubits, &secret, config.iterations)?;
    let stats = CircuitStats::of(&circuit);
    info!(
        "Circuit ready: {} iterations, {} gates, depth {}",
        iterations, stats.gates, stats.depth
    );

    let start = Instant::now();
    let result = backend
        .run(&circuit, config.shots)
        .await
        .stage(AttackStage::Execution)?;
    let execution_time_ms = result
        .execution_time_ms
        .unwrap_or_else(|| start.elapsed().as_millis() as u64);
    info!("Backend returned {} distinct outcomes", result.counts.len());

    let verdict =
        analyze(&result.counts, config.shots, Some(&secret)).stage(AttackStage::Analysis)?;
    info!(
        "Top candidate {} at {:.2}% ({})",
        verdict.candidate,
        verdict.probability * 100.0,
        if verdict.is_success() { "match" } else { "no match" }
    );

    Ok(AttackReport {
        secret,
        num_qubits,
        iterations,
        shots: config.shots,
        backend: backend.name().to_string(),
        circuit: stats,
        verdict,
        theoretical_success: success_probability(num_qubits, iterations),
        execution_time_ms,
        counts: result.counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_stats() {
        let secret: Bitstring = "01".parse().unwrap();
        let (circuit, iterations) = build_search(2, &secret, None).unwrap();
        let stats = CircuitStats::of(&circuit);

        assert_eq!(iterations, 1);
        assert_eq!(stats.num_qubits, 2);
        assert_eq!(stats.gates, circuit.len());
        assert_eq!(stats.gate_counts["mcx"], 2);
        assert_eq!(stats.gate_counts.values().sum::<usize>(), stats.gates);
    }

    #[test]
    fn test_build_search_reports_oracle_stage() {
        let secret: Bitstring = "010".parse().unwrap();
        let err = build_search(2, &secret, None).unwrap_err();
        assert_eq!(err.stage, AttackStage::Oracle);
    }
}
