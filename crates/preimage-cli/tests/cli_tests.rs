//! End-to-end tests driving the `preimage` binary.

use std::io::Write;
use std::process::{Command, Output};

fn preimage(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_preimage"))
        .args(args)
        .env_remove("PREIMAGE_CONFIG")
        .env_remove("PREIMAGE_QUBITS")
        .env_remove("PREIMAGE_SHOTS")
        .env_remove("PREIMAGE_ITERATIONS")
        .env_remove("PREIMAGE_SECRET")
        .env_remove("PREIMAGE_SEED")
        .env_remove("PREIMAGE_MAX_QUBITS")
        .output()
        .expect("failed to launch preimage binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// attack
// ============================================================================

#[test]
fn attack_json_recovers_secret() {
    let output = preimage(&[
        "attack", "-n", "3", "--secret", "101", "--seed", "4", "-f", "json",
    ]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["secret"], "101");
    assert_eq!(report["iterations"], 2);
    assert_eq!(report["verdict"]["candidate"], "101");
    assert_eq!(report["verdict"]["matched"], true);
}

#[test]
fn attack_table_reports_verdict() {
    let output = preimage(&["attack", "-n", "4", "--secret", "0110", "--seed", "1"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Pre-image recovered"));
    assert!(text.contains("0110"));
}

#[test]
fn attack_reads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "num_qubits: 2\nshots: 64\nsecret: \"10\"\nseed: 3").unwrap();

    let path = file.path().to_str().unwrap();
    let output = preimage(&["attack", "-c", path, "-f", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["shots"], 64);
    assert_eq!(report["secret"], "10");
}

#[test]
fn attack_rejects_mismatched_secret() {
    let output = preimage(&["attack", "-n", "3", "--secret", "10"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn attack_rejects_oversized_register() {
    let output = preimage(&["attack", "-n", "8", "--max-qubits", "4"]);
    assert!(!output.status.success());
}

#[test]
fn attack_rejects_unallocatable_register() {
    let output = preimage(&["attack", "-n", "40", "--max-qubits", "40", "-i", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("simulator limit"));
}

// ============================================================================
// inspect / version
// ============================================================================

#[test]
fn inspect_listing_ends_with_measurement() {
    let output = preimage(&["inspect", "-n", "2", "--secret", "11", "-f", "listing"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("circuit grover_2q (2 qubits)"));
    assert!(text.trim_end().ends_with("measure all;"));
}

#[test]
fn inspect_json_has_stats() {
    let output = preimage(&["inspect", "-n", "3", "--secret", "001", "-f", "json"]);
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["iterations"], 2);
    assert_eq!(doc["stats"]["num_qubits"], 3);
    assert_eq!(doc["stats"]["gate_counts"]["mcx"], 4);
}

#[test]
fn inspect_rejects_unallocatable_register() {
    let output = preimage(&["inspect", "-n", "40"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn version_prints_package_version() {
    let output = preimage(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
