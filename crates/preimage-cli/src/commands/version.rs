//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Grover pre-image search over a toy one-way function",
        style("preimage").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  preimage-ir           Gate-sequence circuit model and bit-strings");
    println!("  preimage-hal          Execution backend abstraction");
    println!("  preimage-adapter-sim  Exact statevector simulator");
    println!("  preimage-search       Oracle, diffuser, assembly and analysis");
    println!("  preimage-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
