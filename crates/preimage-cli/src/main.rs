//! Pre-image search command-line interface
//!
//! Runs Grover's search against a toy exact-match oracle on the local
//! statevector simulator.
//!
//! ```text
//! preimage attack -n 12                  # random 12-bit secret
//! preimage attack -n 3 --secret 101 -i 2
//! preimage inspect -n 4 --secret 1010 -f json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::attack::AttackOverrides;
use commands::{attack, inspect, version};

/// Grover pre-image search over a toy one-way function
#[derive(Parser)]
#[command(name = "preimage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, simulate and analyze a full search
    Attack {
        /// Configuration file (YAML)
        #[arg(short, long, env = "PREIMAGE_CONFIG")]
        config: Option<PathBuf>,

        /// Number of qubits (search space size = 2^n)
        #[arg(short = 'n', long)]
        qubits: Option<u32>,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Grover iterations (default: optimal)
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Secret bit-string, most significant bit first (default: random)
        #[arg(long)]
        secret: Option<String>,

        /// Seed for secret generation and sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Largest register the simulator accepts
        #[arg(long)]
        max_qubits: Option<u32>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Number of outcomes to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Build the search circuit and print its structure without running it
    Inspect {
        /// Number of qubits
        #[arg(short = 'n', long, default_value = "3")]
        qubits: u32,

        /// Secret bit-string (default: all zeros)
        #[arg(long)]
        secret: Option<String>,

        /// Grover iterations (default: optimal)
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Output format (summary, listing, json)
        #[arg(short, long, default_value = "summary")]
        format: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Attack {
            config,
            qubits,
            shots,
            iterations,
            secret,
            seed,
            max_qubits,
            format,
            top,
        } => {
            let overrides = AttackOverrides {
                qubits,
                shots,
                iterations,
                secret,
                seed,
                max_qubits,
            };
            attack::execute(config.as_deref(), overrides, &format, top).await
        }

        Commands::Inspect {
            qubits,
            secret,
            iterations,
            format,
        } => inspect::execute(qubits, secret.as_deref(), iterations, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
