//! Error types for the search crate.

use std::fmt;
use thiserror::Error;

/// Errors produced while building, running or interpreting a search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Inconsistent construction input: bit-string length vs qubit count,
    /// malformed bit-string, circuit width mismatch.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Nothing to analyze: zero shots or an empty histogram.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Backend failure, forwarded unmodified.
    #[error(transparent)]
    Backend(#[from] preimage_hal::HalError),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] preimage_ir::IrError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Pipeline stage at which an attack run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStage {
    Configuration,
    Oracle,
    Diffuser,
    Assembly,
    Execution,
    Analysis,
}

impl fmt::Display for AttackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttackStage::Configuration => "configuration",
            AttackStage::Oracle => "oracle construction",
            AttackStage::Diffuser => "diffuser construction",
            AttackStage::Assembly => "assembly",
            AttackStage::Execution => "execution",
            AttackStage::Analysis => "analysis",
        };
        f.write_str(name)
    }
}

/// A failed attack run. Carries the failing stage, never a partial verdict.
#[derive(Debug, Error)]
#[error("Attack failed during {stage}: {source}")]
pub struct AttackError {
    pub stage: AttackStage,
    #[source]
    pub source: SearchError,
}

impl AttackError {
    pub fn new(stage: AttackStage, source: impl Into<SearchError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// Tag a fallible step with its pipeline stage.
pub(crate) trait StageExt<T> {
    fn stage(self, stage: AttackStage) -> Result<T, AttackError>;
}

impl<T, E: Into<SearchError>> StageExt<T> for Result<T, E> {
    fn stage(self, stage: AttackStage) -> Result<T, AttackError> {
        self.map_err(|e| AttackError::new(stage, e))
    }
}
