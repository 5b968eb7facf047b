//! Backend trait and configuration.
//!
//! A backend accepts a complete circuit and a shot count and returns a
//! complete histogram:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (sync, &ref)       (async)       (async)
//! ```
//!
//! There is no job handle: `run()` resolves once, with every shot sampled,
//! or fails. Callers forward failures without interpreting them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use preimage_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from the extra map.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for execution backends.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; capabilities are cached
///   at construction time.
/// - `validate()` checks a circuit against those capabilities without running
///   it. The provided implementation checks width, gate support and the
///   terminal measurement.
/// - `run()` samples `shots` independent measurements of the state prepared
///   by the circuit. The returned counts sum to `shots`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let caps = self.capabilities();
        let mut reasons = vec![];

        if circuit.num_qubits() > caps.num_qubits {
            reasons.push(format!(
                "circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }
        for inst in circuit.instructions() {
            if !caps.supports_gate(inst.name()) {
                reasons.push(format!("unsupported gate '{}'", inst.name()));
                break;
            }
        }
        if !circuit.is_measured() {
            reasons.push("circuit has no terminal measurement".into());
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            debug!(
                "Circuit '{}' rejected by {}: {}",
                circuit.name(),
                self.name(),
                reasons.join("; ")
            );
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    /// Execute a circuit and return the complete measurement histogram.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit is valid and can be run directly.
    Valid,
    /// Circuit is invalid for this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
