//! Local Statevector Simulator
//!
//! An exact, noiseless backend for Grover search circuits. The full state is
//! prepared once per run and every shot is sampled from its probability
//! distribution, so run time is dominated by gate application rather than the
//! shot count.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use preimage_adapter_sim::SimulatorBackend;
//! use preimage_hal::Backend;
//! use preimage_ir::{Circuit, QubitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     let mut circuit = Circuit::with_size("flip", 2);
//!     circuit.x(QubitId(1))?.measure_all();
//!
//!     let result = backend.run(&circuit, 100).await?;
//!     assert_eq!(result.counts.get("10"), 100);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;
