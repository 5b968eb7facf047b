//! Inversion about the mean, 2|s⟩⟨s| − I up to global phase.

use tracing::{debug, instrument};

use preimage_ir::Circuit;

use crate::error::SearchResult;
use crate::oracle::{check_register, phase_flip_all_ones};

/// Build the diffuser over the full register: H all, X all, phase flip on
/// |1…1⟩, X all, H all.
///
/// Depends on nothing but the register width.
#[instrument]
pub fn build_diffuser(num_qubits: u32) -> SearchResult<Circuit> {
    check_register(num_qubits)?;

    let mut circuit = Circuit::with_size("diffuser", num_qubits);
    circuit.h_all()?.x_all()?;
    phase_flip_all_ones(&mut circuit)?;
    circuit.x_all()?.h_all()?;

    debug!("Diffuser built: {} gates", circuit.len());
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_diffuser_gate_count() {
        // 4n single-qubit gates around the 3-gate phase flip
        for n in 1..=6 {
            let diffuser = build_diffuser(n).unwrap();
            assert_eq!(diffuser.len(), 4 * n as usize + 3);
            assert_eq!(diffuser.gate_counts()["mcx"], 1);
        }
    }

    #[test]
    fn test_diffuser_is_pure() {
        assert_eq!(build_diffuser(5).unwrap(), build_diffuser(5).unwrap());
    }

    #[test]
    fn test_empty_register() {
        assert!(matches!(build_diffuser(0), Err(SearchError::Input(_))));
    }
}
