//! Shared output helpers for CLI commands.

use std::fmt;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use preimage_hal::Counts;

/// Print a banner.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
}

/// Print a section heading.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a labelled value.
pub fn print_result(label: &str, value: impl fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Spinner shown while waiting on the backend.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the `top` most frequent outcomes with percentage bars, marking
/// `highlight` when it appears.
#[allow(clippy::cast_precision_loss)]
pub fn print_counts(counts: &Counts, shots: u32, top: usize, highlight: Option<&str>) {
    let sorted = counts.sorted();
    let total = f64::from(shots.max(1));

    for (bitstring, count) in sorted.iter().take(top) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let marker = if highlight == Some(bitstring.as_str()) {
            style("←").yellow().bold().to_string()
        } else {
            String::new()
        };

        println!(
            "  {}: {:>6} ({:>5.2}%) {} {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green(),
            marker
        );
    }

    if sorted.len() > top {
        println!("  ... and {} more outcomes", sorted.len() - top);
    }
}
