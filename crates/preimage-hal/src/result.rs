//! Measurement histograms and execution results.
//!
//! Outcome keys are [`Bitstring`] display strings: zero-padded, most
//! significant bit first, the rightmost character belonging to qubit 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use preimage_ir::Bitstring;

use crate::error::HalResult;

/// Outcome histogram of one run.
///
/// Storage is unordered. Rankings order by count descending, then by
/// ascending bit-string, so equal histograms always rank the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(outcome, count)` pairs; repeated outcomes add up.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (outcome, n) in iter {
            counts.insert(outcome, n);
        }
        counts
    }

    /// Build from a dense tally indexed by basis state.
    ///
    /// Zero entries are skipped. Fails when the tally has more than
    /// `2^width` entries.
    pub fn from_tally(tally: &[u64], width: u32) -> HalResult<Self> {
        let mut counts = Self::new();
        for (index, &n) in tally.iter().enumerate().filter(|(_, n)| **n > 0) {
            counts.insert(Bitstring::from_index(index, width)?.to_string(), n);
        }
        Ok(counts)
    }

    /// Add `n` observations of `outcome`.
    pub fn insert(&mut self, outcome: impl Into<String>, n: u64) {
        *self.counts.entry(outcome.into()).or_default() += n;
    }

    /// Observations of `outcome`, zero when never seen.
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Sum over all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The highest-ranked outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().min_by(|a, b| rank(*a, *b))
    }

    /// All outcomes in rank order.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| rank(*a, *b));
        items
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

fn rank(a: (&String, &u64), b: (&String, &u64)) -> Ordering {
    b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// What a backend hands back for one circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub counts: Counts,
    /// Shots requested.
    pub shots: u32,
    /// Backend-side wall time, when the backend measures it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Free-form backend details.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ExecutionResult {
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
