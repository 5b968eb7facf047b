//! Attack command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use preimage_adapter_sim::SimulatorBackend;
use preimage_hal::{BackendConfig, BackendFactory};
use preimage_search::{AttackConfig, AttackReport, optimal_iterations, run_attack};

use super::common::{print_counts, print_header, print_result, print_section, spinner};

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct AttackOverrides {
    pub qubits: Option<u32>,
    pub shots: Option<u32>,
    pub iterations: Option<u32>,
    pub secret: Option<String>,
    pub seed: Option<u64>,
    pub max_qubits: Option<u32>,
}

impl AttackOverrides {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, mut config: AttackConfig) -> AttackConfig {
        if let Some(v) = self.qubits {
            config.num_qubits = v;
        }
        if let Some(v) = self.shots {
            config.shots = v;
        }
        if let Some(v) = self.iterations {
            config.iterations = Some(v);
        }
        if let Some(v) = self.secret {
            config.secret = Some(v);
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        if let Some(v) = self.max_qubits {
            config.max_qubits = v;
        }
        config
    }
}

/// Build the simulator described by `config`.
pub fn simulator_for(config: &AttackConfig) -> Result<SimulatorBackend> {
    let mut backend_config = BackendConfig::new("simulator")
        .with_extra("max_qubits", serde_json::json!(config.max_qubits));
    if let Some(seed) = config.seed {
        backend_config = backend_config.with_extra("seed", serde_json::json!(seed));
    }
    Ok(SimulatorBackend::from_config(backend_config)?)
}

/// Execute the attack command.
pub async fn execute(
    config_path: Option<&Path>,
    overrides: AttackOverrides,
    format: &str,
    top: usize,
) -> Result<()> {
    let mut config = overrides.apply(
        AttackConfig::load(config_path).context("Failed to load attack configuration")?,
    );
    config.validate()?;

    // Fix the secret up front so it can be shown before the run.
    let secret = config.resolve_secret()?;
    config.secret = Some(secret.to_string());
    debug!("Resolved configuration: {:?}", config);

    let backend = simulator_for(&config)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let report = run_attack(&config, &backend).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => {
            print_header("Grover Pre-image Search");

            print_section("Problem Setup");
            print_result("Qubits", config.num_qubits);
            print_result("Search space", 1u64 << config.num_qubits);
            print_result(
                "Secret",
                format!("{} (decimal {})", style(&secret).yellow(), secret.index()),
            );
            print_result("Shots", config.shots);

            let pb = spinner(format!(
                "Simulating {} iterations...",
                config
                    .iterations
                    .unwrap_or_else(|| optimal_iterations(config.num_qubits))
            ));
            let report = run_attack(&config, &backend).await;
            pb.finish_and_clear();

            print_report(&report?, top);
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

fn print_report(report: &AttackReport, top: usize) {
    print_section("Circuit");
    print_result("Iterations", report.iterations);
    print_result("Gates", report.circuit.gates);
    print_result("Depth", report.circuit.depth);
    let gate_counts: Vec<String> = report
        .circuit
        .gate_counts
        .iter()
        .map(|(name, count)| format!("{name}={count}"))
        .collect();
    print_result("Gate counts", gate_counts.join(", "));

    print_section(&format!("Outcomes ({} shots)", report.shots));
    let secret = report.secret.to_string();
    print_counts(&report.counts, report.shots, top, Some(&secret));

    print_section("Verdict");
    let verdict = &report.verdict;
    print_result("Top candidate", style(&verdict.candidate).cyan().bold());
    print_result(
        "Confidence",
        format!(
            "{:.2}% ({}/{} shots)",
            verdict.probability * 100.0,
            verdict.count,
            report.shots
        ),
    );
    print_result(
        "Theoretical success",
        format!("{:.2}%", report.theoretical_success * 100.0),
    );
    print_result("Oracle calls", report.iterations);
    print_result(
        "Classical expected",
        format!("~{}", (1u64 << report.num_qubits) / 2),
    );
    print_result(
        "Execution time",
        format!("{} ms", style(report.execution_time_ms).yellow()),
    );

    println!();
    if verdict.is_success() {
        println!(
            "{} Pre-image recovered: {}",
            style("✓").green().bold(),
            style(&verdict.candidate).green().bold()
        );
    } else {
        println!(
            "{} Search failed: top candidate {} does not match the secret {}",
            style("✗").red().bold(),
            verdict.candidate,
            report.secret
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let base = AttackConfig {
            num_qubits: 8,
            shots: 100,
            seed: Some(1),
            ..AttackConfig::default()
        };
        let config = AttackOverrides {
            qubits: Some(3),
            secret: Some("011".into()),
            ..AttackOverrides::default()
        }
        .apply(base);

        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.secret.as_deref(), Some("011"));
        assert_eq!(config.shots, 100);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let base = AttackConfig::default();
        assert_eq!(AttackOverrides::default().apply(base.clone()), base);
    }

    #[tokio::test]
    async fn test_simulator_for_config() {
        use preimage_hal::Backend;

        let config = AttackConfig {
            num_qubits: 3,
            secret: Some("110".into()),
            seed: Some(8),
            max_qubits: 6,
            ..AttackConfig::default()
        };
        let backend = simulator_for(&config).unwrap();
        assert_eq!(backend.capabilities().num_qubits, 6);
        assert_eq!(backend.seed(), Some(8));

        let report = run_attack(&config, &backend).await.unwrap();
        assert!(report.verdict.is_success());
    }
}
