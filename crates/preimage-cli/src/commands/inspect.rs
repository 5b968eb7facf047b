//! Inspect command implementation.

use anyhow::{Context, Result};
use console::style;

use preimage_hal::SIMULATOR_QUBIT_LIMIT;
use preimage_ir::Bitstring;
use preimage_search::{CircuitStats, build_search, success_probability};

use super::common::{print_header, print_result, print_section};

/// Execute the inspect command.
pub fn execute(
    qubits: u32,
    secret: Option<&str>,
    iterations: Option<u32>,
    format: &str,
) -> Result<()> {
    if qubits > SIMULATOR_QUBIT_LIMIT {
        anyhow::bail!(
            "{qubits} qubits exceeds the simulator limit of {SIMULATOR_QUBIT_LIMIT}"
        );
    }

    let secret = match secret {
        Some(s) => s
            .parse::<Bitstring>()
            .with_context(|| format!("Invalid secret '{s}'"))?,
        None => Bitstring::from_index(0, qubits)?,
    };

    let (circuit, iterations) = build_search(qubits, &secret, iterations)?;
    let stats = CircuitStats::of(&circuit);

    match format.to_lowercase().as_str() {
        "summary" => {
            print_header("Grover Search Circuit");
            print_section("Structure");
            print_result("Secret", style(&secret).yellow());
            print_result("Qubits", stats.num_qubits);
            print_result("Iterations", iterations);
            print_result("Gates", stats.gates);
            print_result("Depth", stats.depth);
            for (name, count) in &stats.gate_counts {
                print_result(&format!("  {name}"), count);
            }
            print_result(
                "Theoretical success",
                format!("{:.2}%", success_probability(qubits, iterations) * 100.0),
            );
        }
        "listing" => print!("{circuit}"),
        "json" => {
            let doc = serde_json::json!({
                "secret": secret,
                "iterations": iterations,
                "theoretical_success": success_probability(qubits, iterations),
                "stats": stats,
                "circuit": circuit,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: summary, listing, json"),
    }

    Ok(())
}
