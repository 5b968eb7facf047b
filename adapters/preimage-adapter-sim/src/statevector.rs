//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use preimage_ir::{Circuit, Instruction, StandardGate};

/// A statevector over `n` qubits: `2^n` complex amplitudes.
///
/// Bit `i` of an amplitude's index is the value of qubit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 2^num_qubits`.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap raw amplitudes. Returns `None` unless the length is a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Option<Self> {
        if !amplitudes.len().is_power_of_two() {
            return None;
        }
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Some(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm of the state (1 for a normalized state).
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Largest amplitude-wise distance to `other`.
    pub fn max_distance(&self, other: &Statevector) -> f64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Apply every instruction of `circuit` in order.
    ///
    /// The terminal measurement marker is ignored; sampling is separate.
    pub fn apply_circuit(&mut self, circuit: &Circuit) {
        for inst in circuit.instructions() {
            self.apply(inst);
        }
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        let target = instruction.target().0 as usize;
        match instruction.gate {
            StandardGate::H => self.apply_h(target),
            StandardGate::X => self.apply_x(target),
            StandardGate::Mcx { .. } => {
                let controls = instruction
                    .controls()
                    .iter()
                    .fold(0usize, |mask, q| mask | q.mask());
                self.apply_mcx(controls, target);
            }
        }
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        self.apply_mcx(0, qubit);
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Flip `target` on every basis state where all bits of `ctrl_mask` are set.
    fn apply_mcx(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Cumulative probability table for repeated sampling.
    pub fn cumulative(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .scan(0.0, |acc, amp| {
                *acc += amp.norm_sqr();
                Some(*acc)
            })
            .collect()
    }

    /// Sample a measurement outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        sample_cumulative(&self.cumulative(), rng)
    }
}

/// Draw one basis index from a cumulative probability table.
pub(crate) fn sample_cumulative<R: Rng + ?Sized>(cumulative: &[f64], rng: &mut R) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let r: f64 = rng.r#gen::<f64>() * total;
    cumulative
        .partition_point(|&c| c <= r)
        .min(cumulative.len().saturating_sub(1))
}
