//! Grover pre-image search
//!
//! Recovers an N-bit secret from an exact-match oracle in about
//! π/4·√(2^N) oracle calls instead of the classical 2^N/2.
//!
//! # Components
//!
//! - [`build_oracle`]: phase-marks the secret's basis state
//! - [`build_diffuser`]: inversion about the mean
//! - [`assemble`]: superposition, repeated (oracle, diffuser), measurement;
//!   picks the iteration count via [`optimal_iterations`]
//! - [`analyze`]: histogram → [`Verdict`]
//! - [`run_attack`]: the whole pipeline against any [`preimage_hal::Backend`]
//!
//! Builders are synchronous and pure. The backend is called once per run.
//!
//! # Example
//!
//! ```rust
//! use preimage_ir::Bitstring;
//! use preimage_search::{assemble, build_diffuser, build_oracle};
//!
//! let secret: Bitstring = "101".parse().unwrap();
//! let oracle = build_oracle(3, &secret).unwrap();
//! let diffuser = build_diffuser(3).unwrap();
//! let (circuit, iterations) = assemble(&oracle, &diffuser, 3, None).unwrap();
//!
//! assert_eq!(iterations, 2);
//! assert!(circuit.is_measured());
//! ```

pub mod analyzer;
pub mod assembler;
pub mod attack;
pub mod config;
pub mod diffuser;
pub mod error;
pub mod oracle;

pub use analyzer::{Verdict, analyze};
pub use assembler::{assemble, optimal_iterations, success_probability};
pub use attack::{AttackReport, CircuitStats, build_search, run_attack};
pub use config::{AttackConfig, random_secret};
pub use diffuser::build_diffuser;
pub use error::{AttackError, AttackStage, ConfigError, SearchError, SearchResult};
pub use oracle::build_oracle;
