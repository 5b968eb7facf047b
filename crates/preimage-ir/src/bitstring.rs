//! Fixed-width bit-strings for secrets and measurement outcomes.
//!
//! # Bit ordering
//!
//! Bit-strings are exchanged in display order: zero-padded, most significant
//! bit first. Internally, qubit `i` corresponds to the `i`-th character
//! counted from the **right**, so `"110"` means qubit 0 = 0, qubit 1 = 1,
//! qubit 2 = 1. Oracle construction and outcome decoding both go through
//! [`Bitstring::bit`] / [`Bitstring::from_index`], which is what keeps the
//! marked state and the decoded state in agreement.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Widest register whose basis index still fits in a `usize`.
pub const MAX_WIDTH: u32 = usize::BITS - 1;

/// A fixed-width string of bits, one per qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring {
    /// `bits[i]` is the value of qubit `i`.
    bits: Vec<bool>,
}

impl Bitstring {
    /// Build a bit-string from per-qubit values (`bits[i]` = qubit `i`).
    pub fn from_bits(bits: Vec<bool>) -> IrResult<Self> {
        check_width(bits.len())?;
        Ok(Self { bits })
    }

    /// Decode a computational-basis index into a `width`-bit string.
    ///
    /// Bit `i` of `index` becomes qubit `i`, i.e. the `i`-th character from
    /// the right in display form.
    pub fn from_index(index: usize, width: u32) -> IrResult<Self> {
        check_width(width as usize)?;
        if width < usize::BITS && index >> width != 0 {
            return Err(IrError::InvalidBitstring {
                value: index.to_string(),
                reason: format!("index does not fit in {width} bits"),
            });
        }
        let bits = (0..width).map(|i| (index >> i) & 1 == 1).collect();
        Ok(Self { bits })
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; bit-strings hold at least one bit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Width as a qubit count.
    #[inline]
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Value of the bit belonging to `qubit`, or `None` if out of range.
    #[inline]
    pub fn bit(&self, qubit: QubitId) -> Option<bool> {
        self.bits.get(qubit.0 as usize).copied()
    }

    /// Qubits whose bit is 0.
    pub fn zero_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| !**bit)
            .map(|(i, _)| QubitId(i as u32))
    }

    /// The computational-basis index this bit-string labels.
    pub fn index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | (usize::from(bit) << i))
    }
}

fn check_width(width: usize) -> IrResult<()> {
    if width == 0 {
        return Err(IrError::EmptyRegister);
    }
    if width > MAX_WIDTH as usize {
        return Err(IrError::RegisterTooWide(width as u32));
    }
    Ok(())
}

impl FromStr for Bitstring {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        if s.is_empty() {
            return Err(IrError::InvalidBitstring {
                value: String::new(),
                reason: "empty string".into(),
            });
        }
        let bits = s
            .chars()
            .rev()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(IrError::InvalidBitstring {
                    value: s.to_string(),
                    reason: format!("unexpected character '{other}'"),
                }),
            })
            .collect::<IrResult<Vec<_>>>()?;
        Self::from_bits(bits)
    }
}

impl TryFrom<String> for Bitstring {
    type Error = IrError;

    fn try_from(value: String) -> IrResult<Self> {
        value.parse()
    }
}

impl From<Bitstring> for String {
    fn from(value: Bitstring) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.bits.iter().rev() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Ordered like the display strings: most significant bit first.
impl Ord for Bitstring {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits
            .len()
            .cmp(&other.bits.len())
            .then_with(|| self.bits.iter().rev().cmp(other.bits.iter().rev()))
    }
}

impl PartialOrd for Bitstring {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
