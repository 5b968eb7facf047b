//! Grover circuit assembly and the iteration-count policy.

use std::f64::consts::PI;
use tracing::{debug, instrument};

use preimage_ir::Circuit;

use crate::error::{SearchError, SearchResult};
use crate::oracle::check_register;

/// Optimal number of Grover iterations for one marked item among 2^n.
///
/// `floor(π/4 · √(2^n))`, e.g. 50 for 12 qubits.
pub fn optimal_iterations(num_qubits: u32) -> u32 {
    let space = 2f64.powi(num_qubits as i32);
    (PI / 4.0 * space.sqrt()).floor() as u32
}

/// Ideal probability of measuring the marked item after `iterations` rounds:
/// `sin²((2k+1)·θ)` with `θ = asin(1/√2^n)`.
pub fn success_probability(num_qubits: u32, iterations: u32) -> f64 {
    let theta = (1.0 / 2f64.powi(num_qubits as i32).sqrt()).asin();
    let angle = (2.0 * f64::from(iterations) + 1.0) * theta;
    angle.sin().powi(2)
}

/// Assemble the full search circuit.
///
/// H on every qubit, then `iterations` copies of (oracle, diffuser), then the
/// terminal measure-all marker. `None` selects [`optimal_iterations`]; an
/// explicit `Some(0)` yields the bare uniform superposition.
///
/// Returns the circuit together with the iteration count actually used.
#[instrument(skip(oracle, diffuser))]
pub fn assemble(
    oracle: &Circuit,
    diffuser: &Circuit,
    num_qubits: u32,
    iterations: Option<u32>,
) -> SearchResult<(Circuit, u32)> {
    check_register(num_qubits)?;
    for (role, part) in [("oracle", oracle), ("diffuser", diffuser)] {
        if part.num_qubits() != num_qubits {
            return Err(SearchError::Input(format!(
                "{role} acts on {} qubits but the register has {num_qubits}",
                part.num_qubits()
            )));
        }
    }

    let iterations = iterations.unwrap_or_else(|| optimal_iterations(num_qubits));

    let mut circuit = Circuit::with_size(format!("grover_{num_qubits}q"), num_qubits);
    circuit.h_all()?;
    for _ in 0..iterations {
        circuit.append(oracle)?.append(diffuser)?;
    }
    circuit.measure_all();

    debug!(
        "Assembled {} iterations: {} gates, depth {}",
        iterations,
        circuit.len(),
        circuit.depth()
    );
    Ok((circuit, iterations))
}
