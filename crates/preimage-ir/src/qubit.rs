//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a register (0..N-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Bit mask selecting this qubit in a basis-state index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Iterate over every qubit of an `n`-qubit register in index order.
pub fn register(num_qubits: u32) -> impl DoubleEndedIterator<Item = QubitId> + Clone {
    (0..num_qubits).map(QubitId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(11)), "q11");
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(QubitId(0).mask(), 0b1);
        assert_eq!(QubitId(3).mask(), 0b1000);
    }

    #[test]
    fn test_register_order() {
        let ids: Vec<_> = register(3).collect();
        assert_eq!(ids, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(register(3).next_back(), Some(QubitId(2)));
    }
}
