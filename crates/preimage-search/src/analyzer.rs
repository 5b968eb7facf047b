//! Turning a measurement histogram into a verdict.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use preimage_hal::Counts;
use preimage_ir::Bitstring;

use crate::error::{SearchError, SearchResult};

/// Outcome of analyzing one histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Most frequently measured bit-string.
    pub candidate: Bitstring,
    /// How often it was measured.
    pub count: u64,
    /// `count / shots`.
    pub probability: f64,
    /// Whether the candidate equals the ground truth, when one was given.
    pub matched: Option<bool>,
}

impl Verdict {
    /// True only when a ground truth was given and the candidate matches it.
    pub fn is_success(&self) -> bool {
        self.matched == Some(true)
    }
}

/// Pick the most probable candidate from `counts`.
///
/// Ties on count go to the smallest bit-string, so repeated calls on the same
/// histogram always agree.
pub fn analyze(
    counts: &Counts,
    shots: u32,
    ground_truth: Option<&Bitstring>,
) -> SearchResult<Verdict> {
    if shots == 0 {
        return Err(SearchError::EmptyResult("zero shots".into()));
    }

    let total = counts.total_shots();
    if total != u64::from(shots) {
        warn!(
            "Histogram holds {} outcomes but {} shots were requested",
            total, shots
        );
    }

    let (key, &count) = counts
        .most_frequent()
        .ok_or_else(|| SearchError::EmptyResult("histogram has no outcomes".into()))?;

    let candidate: Bitstring = key
        .parse()
        .map_err(|e| SearchError::Input(format!("malformed outcome '{key}': {e}")))?;

    let matched = match ground_truth {
        Some(truth) if truth.width() != candidate.width() => {
            return Err(SearchError::Input(format!(
                "ground truth has {} bits but outcomes have {}",
                truth.width(),
                candidate.width()
            )));
        }
        Some(truth) => Some(*truth == candidate),
        None => None,
    };

    #[allow(clippy::cast_precision_loss)]
    let probability = count as f64 / f64::from(shots);

    debug!(
        "Top candidate {} ({}/{} shots, {} distinct outcomes)",
        candidate,
        count,
        shots,
        counts.len()
    );

    Ok(Verdict {
        candidate,
        count,
        probability,
        matched,
    })
}
