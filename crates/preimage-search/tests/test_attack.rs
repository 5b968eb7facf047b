//! End-to-end search runs against the seeded statevector simulator.

use async_trait::async_trait;

use preimage_adapter_sim::SimulatorBackend;
use preimage_hal::{Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult};
use preimage_ir::{Bitstring, Circuit};
use preimage_search::{
    AttackConfig, AttackStage, SearchError, analyze, assemble, build_diffuser, build_oracle,
    optimal_iterations, run_attack,
};

fn bits(s: &str) -> Bitstring {
    s.parse().unwrap()
}

// ---------------------------------------------------------------------------
// Iteration policy
// ---------------------------------------------------------------------------

#[test]
fn twelve_qubits_use_fifty_iterations() {
    assert_eq!(optimal_iterations(12), 50);

    let secret = Bitstring::from_index(0xABC, 12).unwrap();
    let oracle = build_oracle(12, &secret).unwrap();
    let diffuser = build_diffuser(12).unwrap();
    let (_, iterations) = assemble(&oracle, &diffuser, 12, None).unwrap();
    assert_eq!(iterations, 50);
}

// ---------------------------------------------------------------------------
// Scenario A: three qubits, secret "101", two iterations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_qubit_search_finds_secret() {
    let secret = bits("101");
    let oracle = build_oracle(3, &secret).unwrap();
    let diffuser = build_diffuser(3).unwrap();
    let (circuit, iterations) = assemble(&oracle, &diffuser, 3, None).unwrap();
    assert_eq!(iterations, 2);

    let backend = SimulatorBackend::new().with_seed(5);
    let result = backend.run(&circuit, 1024).await.unwrap();
    assert_eq!(result.counts.total_shots(), 1024);

    let verdict = analyze(&result.counts, 1024, Some(&secret)).unwrap();
    assert_eq!(verdict.candidate, secret);
    assert!(verdict.probability > 0.90, "p = {}", verdict.probability);
    assert!(verdict.is_success());
}

// ---------------------------------------------------------------------------
// Scenario B: zero iterations leave the register uniform
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_iterations_give_uniform_histogram() {
    let secret = bits("101");
    let oracle = build_oracle(3, &secret).unwrap();
    let diffuser = build_diffuser(3).unwrap();
    let (circuit, iterations) = assemble(&oracle, &diffuser, 3, Some(0)).unwrap();
    assert_eq!(iterations, 0);

    let backend = SimulatorBackend::new().with_seed(17);
    let result = backend.run(&circuit, 8000).await.unwrap();

    assert_eq!(result.counts.len(), 8);
    for index in 0..8 {
        let key = Bitstring::from_index(index, 3).unwrap().to_string();
        let count = result.counts.get(&key);
        assert!((800..1200).contains(&count), "{key}: {count}");
    }

    let verdict = analyze(&result.counts, 8000, Some(&secret)).unwrap();
    assert!(verdict.probability < 0.2);
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_attack_reports_success() {
    let config = AttackConfig {
        num_qubits: 5,
        shots: 512,
        secret: Some("10011".into()),
        seed: Some(3),
        ..AttackConfig::default()
    };
    let backend = SimulatorBackend::with_max_qubits(config.max_qubits)
        .unwrap()
        .with_seed(3);

    let report = run_attack(&config, &backend).await.unwrap();
    assert_eq!(report.secret, bits("10011"));
    assert_eq!(report.iterations, 4);
    assert_eq!(report.backend, "simulator");
    assert_eq!(report.counts.total_shots(), 512);
    assert!(report.theoretical_success > 0.99);
    assert!(report.verdict.is_success());
    assert!(report.circuit.depth > 0);
}

#[tokio::test]
async fn run_attack_random_secret_is_found() {
    let config = AttackConfig {
        num_qubits: 6,
        shots: 256,
        seed: Some(1234),
        ..AttackConfig::default()
    };
    let backend = SimulatorBackend::new().with_seed(1234);

    let report = run_attack(&config, &backend).await.unwrap();
    assert_eq!(report.secret, config.resolve_secret().unwrap());
    assert_eq!(report.verdict.candidate, report.secret);
}

#[tokio::test]
async fn run_attack_rejects_bad_config() {
    let config = AttackConfig {
        num_qubits: 3,
        secret: Some("10".into()),
        ..AttackConfig::default()
    };
    let err = run_attack(&config, &SimulatorBackend::new())
        .await
        .unwrap_err();
    assert_eq!(err.stage, AttackStage::Configuration);
    assert!(matches!(err.source, SearchError::Config(_)));
}

#[tokio::test]
async fn run_attack_rejects_unallocatable_width() {
    let config = AttackConfig {
        num_qubits: 40,
        max_qubits: 40,
        iterations: Some(0),
        shots: 1,
        ..AttackConfig::default()
    };
    let err = run_attack(&config, &SimulatorBackend::new())
        .await
        .unwrap_err();
    assert_eq!(err.stage, AttackStage::Configuration);
    assert!(matches!(err.source, SearchError::Config(_)));
}

/// Backend that always fails, to check errors pass through untouched.
struct BrokenBackend {
    caps: Capabilities,
}

#[async_trait]
impl Backend for BrokenBackend {
    fn name(&self) -> &str {
        "broken"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn run(&self, _circuit: &Circuit, _shots: u32) -> HalResult<ExecutionResult> {
        Err(HalError::Backend("device offline".into()))
    }
}

#[tokio::test]
async fn backend_failure_is_forwarded() {
    let config = AttackConfig {
        num_qubits: 2,
        secret: Some("01".into()),
        ..AttackConfig::default()
    };
    let backend = BrokenBackend {
        caps: Capabilities::simulator(2),
    };

    let err = run_attack(&config, &backend).await.unwrap_err();
    assert_eq!(err.stage, AttackStage::Execution);
    match err.source {
        SearchError::Backend(HalError::Backend(msg)) => assert_eq!(msg, "device offline"),
        other => panic!("unexpected error: {other}"),
    }
}

/// Backend that returns nothing, to check the analysis stage is reported.
struct EmptyBackend {
    caps: Capabilities,
}

#[async_trait]
impl Backend for EmptyBackend {
    fn name(&self) -> &str {
        "empty"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn run(&self, _circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        Ok(ExecutionResult::new(Counts::new(), shots))
    }
}

#[tokio::test]
async fn empty_histogram_fails_analysis() {
    let config = AttackConfig {
        num_qubits: 2,
        secret: Some("11".into()),
        ..AttackConfig::default()
    };
    let backend = EmptyBackend {
        caps: Capabilities::simulator(2),
    };

    let err = run_attack(&config, &backend).await.unwrap_err();
    assert_eq!(err.stage, AttackStage::Analysis);
    assert!(matches!(err.source, SearchError::EmptyResult(_)));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn tie_break_is_stable_across_calls() {
    let counts = Counts::from_pairs([("1000", 25), ("0111", 25), ("0001", 25), ("1111", 25)]);
    let first = analyze(&counts, 100, None).unwrap();
    for _ in 0..20 {
        assert_eq!(analyze(&counts.clone(), 100, None).unwrap(), first);
    }
    assert_eq!(first.candidate, bits("0001"));
}
