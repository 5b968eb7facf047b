//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use preimage_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, SIMULATOR_QUBIT_LIMIT, ValidationResult,
};
use preimage_ir::Circuit;

use crate::statevector::{Statevector, sample_cumulative};

/// Default register limit; 2^20 amplitudes is 16 MB.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// Every run prepares the state once, then draws all shots from its exact
/// probability distribution. With a seed, identical runs return identical
/// histograms.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Sampling seed; `None` draws from OS entropy.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    ///
    /// Fails above [`SIMULATOR_QUBIT_LIMIT`].
    pub fn with_max_qubits(max_qubits: u32) -> HalResult<Self> {
        check_limit(max_qubits)?;
        Ok(Self::build(BackendConfig::new("simulator"), max_qubits, None))
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        Self {
            config,
            capabilities: Capabilities::simulator(max_qubits),
            seed,
        }
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured sampling seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn check_shots(&self, shots: u32) -> HalResult<()> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shot count must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows at most {}",
                self.capabilities.max_shots
            )));
        }
        Ok(())
    }
}

fn check_limit(max_qubits: u32) -> HalResult<()> {
    if max_qubits > SIMULATOR_QUBIT_LIMIT {
        return Err(HalError::CircuitTooLarge(format!(
            "max_qubits {max_qubits} exceeds the simulator limit of {SIMULATOR_QUBIT_LIMIT}"
        )));
    }
    Ok(())
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepare the state and sample `shots` outcomes.
#[instrument(skip(circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
fn run_simulation(circuit: &Circuit, shots: u32, seed: Option<u64>) -> HalResult<ExecutionResult> {
    let start = Instant::now();
    let num_qubits = circuit.num_qubits();
    debug!(
        "Starting simulation: {} qubits, {} gates, {} shots",
        num_qubits,
        circuit.len(),
        shots
    );

    let mut sv = Statevector::new(num_qubits as usize);
    sv.apply_circuit(circuit);
    debug!("State prepared in {:?}", start.elapsed());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cumulative = sv.cumulative();
    let mut tally = vec![0u64; cumulative.len()];
    for _ in 0..shots {
        tally[sample_cumulative(&cumulative, &mut rng)] += 1;
    }

    let counts = Counts::from_tally(&tally, num_qubits)?;

    let elapsed = start.elapsed();
    debug!(
        "Simulation completed in {:?}: {} distinct outcomes",
        elapsed,
        counts.len()
    );

    Ok(ExecutionResult::new(counts, shots)
        .with_execution_time(elapsed.as_millis() as u64)
        .with_metadata(serde_json::json!({
            "backend": "simulator",
            "seed": seed,
            "gates": circuit.len(),
        })))
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.check_shots(shots)?;

        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let circuit = circuit.clone();
        let seed = self.seed;
        tokio::task::spawn_blocking(move || run_simulation(&circuit, shots, seed))
            .await
            .map_err(|e| HalError::Backend(format!("simulation task failed: {e}")))?
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits") {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::CircuitTooLarge(format!(
                    "max_qubits {v} exceeds the simulator limit of {SIMULATOR_QUBIT_LIMIT}"
                ))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        check_limit(max_qubits)?;
        let seed = config.get_u64("seed");

        Ok(Self::build(config, max_qubits, seed))
    }
}
