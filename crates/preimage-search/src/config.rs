//! Attack configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Default values
//! 2. Configuration file (YAML)
//! 3. Environment variables (with `PREIMAGE_` prefix)
//! 4. Command-line flags, applied by the caller

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use preimage_hal::SIMULATOR_QUBIT_LIMIT;
use preimage_ir::{Bitstring, MAX_WIDTH};

use crate::error::{ConfigError, SearchError, SearchResult};

/// Everything one attack run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Register width; the search space is 2^num_qubits.
    pub num_qubits: u32,
    /// Number of measurement shots.
    pub shots: u32,
    /// Iteration override; `None` uses the optimal count.
    pub iterations: Option<u32>,
    /// Secret in display form (MSB first); random when absent.
    pub secret: Option<String>,
    /// Seed for secret generation and sampling.
    pub seed: Option<u64>,
    /// Largest register the simulator will accept.
    pub max_qubits: u32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            num_qubits: 12,
            shots: 1024,
            iterations: None,
            secret: None,
            seed: None,
            max_qubits: 20,
        }
    }
}

impl AttackConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: AttackConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => AttackConfig::default(),
        };
        Ok(config.merge_env())
    }

    /// Apply `PREIMAGE_*` environment variable overrides.
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparsable numeric values are ignored with a warning.
    #[must_use]
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = parse_var(&lookup, "PREIMAGE_QUBITS") {
            self.num_qubits = v;
        }
        if let Some(v) = parse_var(&lookup, "PREIMAGE_SHOTS") {
            self.shots = v;
        }
        if let Some(v) = parse_var(&lookup, "PREIMAGE_ITERATIONS") {
            self.iterations = Some(v);
        }
        if let Some(v) = lookup("PREIMAGE_SECRET") {
            self.secret = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "PREIMAGE_SEED") {
            self.seed = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "PREIMAGE_MAX_QUBITS") {
            self.max_qubits = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "num_qubits must be at least 1".into(),
            ));
        }
        if self.max_qubits > SIMULATOR_QUBIT_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits {} exceeds the simulator limit of {SIMULATOR_QUBIT_LIMIT}",
                self.max_qubits
            )));
        }
        if self.num_qubits > self.max_qubits {
            return Err(ConfigError::ValidationError(format!(
                "num_qubits {} exceeds max_qubits {}",
                self.num_qubits, self.max_qubits
            )));
        }
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be at least 1".into(),
            ));
        }
        if let Some(secret) = &self.secret {
            let bits: Bitstring = secret.parse().map_err(|e| {
                ConfigError::ValidationError(format!("invalid secret: {e}"))
            })?;
            if bits.width() != self.num_qubits {
                return Err(ConfigError::ValidationError(format!(
                    "secret '{secret}' has {} bits but num_qubits is {}",
                    bits.width(),
                    self.num_qubits
                )));
            }
        }
        Ok(())
    }

    /// The secret to search for: the configured one, or a uniformly random
    /// one drawn from the configured seed (or OS entropy without a seed).
    pub fn resolve_secret(&self) -> SearchResult<Bitstring> {
        match &self.secret {
            Some(secret) => {
                let bits: Bitstring = secret.parse().map_err(|e| {
                    SearchError::Input(format!("invalid secret '{secret}': {e}"))
                })?;
                if bits.width() != self.num_qubits {
                    return Err(SearchError::Input(format!(
                        "secret '{secret}' has {} bits but num_qubits is {}",
                        bits.width(),
                        self.num_qubits
                    )));
                }
                Ok(bits)
            }
            None => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                random_secret(self.num_qubits, &mut rng)
            }
        }
    }
}

/// Draw a uniformly random `num_qubits`-bit secret.
pub fn random_secret<R: Rng + ?Sized>(num_qubits: u32, rng: &mut R) -> SearchResult<Bitstring> {
    if num_qubits == 0 || num_qubits > MAX_WIDTH {
        return Err(SearchError::Input(format!(
            "cannot draw a {num_qubits}-bit secret"
        )));
    }
    let index = rng.gen_range(0..(1usize << num_qubits));
    Ok(Bitstring::from_index(index, num_qubits)?)
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
