//! Phase-marking oracle.
//!
//! The oracle is the diagonal unitary that is −1 on |target⟩ and +1 on every
//! other basis state. It stands in for "evaluate the one-way function and
//! compare against the published digest": an exact-match toy.
//!
//! Construction:
//! 1. X on every qubit whose target bit is 0, mapping |target⟩ to |1…1⟩
//! 2. Phase flip on |1…1⟩
//! 3. Undo step 1

use tracing::{debug, instrument};

use preimage_ir::{Bitstring, Circuit, QubitId, register};

use crate::error::{SearchError, SearchResult};

/// Build the oracle marking `target` on an `num_qubits`-qubit register.
///
/// Qubit `i` is compared against the `i`-th character of `target` counted
/// from the right, the same convention used to decode measurement outcomes.
#[instrument(skip(target), fields(target = %target))]
pub fn build_oracle(num_qubits: u32, target: &Bitstring) -> SearchResult<Circuit> {
    check_register(num_qubits)?;
    if target.width() != num_qubits {
        return Err(SearchError::Input(format!(
            "target '{target}' has {} bits but the register has {num_qubits} qubits",
            target.width()
        )));
    }

    let zeros: Vec<QubitId> = target.zero_qubits().collect();
    let mut circuit = Circuit::with_size(format!("oracle_{target}"), num_qubits);

    for &q in &zeros {
        circuit.x(q)?;
    }
    phase_flip_all_ones(&mut circuit)?;
    for &q in &zeros {
        circuit.x(q)?;
    }

    debug!(
        "Oracle built: {} gates, {} qubits flipped",
        circuit.len(),
        zeros.len()
    );
    Ok(circuit)
}

/// Flip the sign of |1…1⟩: H(n-1) · MCX(0..n-2 → n-1) · H(n-1).
///
/// With one qubit the control set is empty and this reduces to Z.
pub(crate) fn phase_flip_all_ones(circuit: &mut Circuit) -> SearchResult<()> {
    let n = circuit.num_qubits();
    let target = QubitId(n - 1);
    let controls: Vec<QubitId> = register(n - 1).collect();
    circuit.mcz(&controls, target)?;
    Ok(())
}

pub(crate) fn check_register(num_qubits: u32) -> SearchResult<()> {
    if num_qubits == 0 {
        return Err(SearchError::Input(
            "register must contain at least one qubit".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use preimage_ir::StandardGate;

    #[test]
    fn test_oracle_structure() {
        let target: Bitstring = "101".parse().unwrap();
        let oracle = build_oracle(3, &target).unwrap();

        // x(q1), h(q2), mcx, h(q2), x(q1)
        let names: Vec<_> = oracle.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["x", "h", "mcx", "h", "x"]);
        assert_eq!(oracle.instructions()[0].target(), QubitId(1));
        assert_eq!(
            oracle.instructions()[2].controls(),
            &[QubitId(0), QubitId(1)]
        );
        assert!(!oracle.is_measured());
    }

    #[test]
    fn test_oracle_all_ones_has_no_x() {
        let target: Bitstring = "1111".parse().unwrap();
        let oracle = build_oracle(4, &target).unwrap();
        assert_eq!(oracle.len(), 3);
    }

    #[test]
    fn test_single_qubit_oracle() {
        let target: Bitstring = "0".parse().unwrap();
        let oracle = build_oracle(1, &target).unwrap();
        let gates: Vec<_> = oracle.instructions().iter().map(|i| i.gate).collect();
        assert_eq!(
            gates,
            vec![
                StandardGate::X,
                StandardGate::H,
                StandardGate::Mcx { num_controls: 0 },
                StandardGate::H,
                StandardGate::X,
            ]
        );
    }

    #[test]
    fn test_width_mismatch() {
        let target: Bitstring = "10".parse().unwrap();
        assert!(matches!(
            build_oracle(3, &target),
            Err(SearchError::Input(_))
        ));
        assert!(matches!(
            build_oracle(0, &target),
            Err(SearchError::Input(_))
        ));
    }
}
