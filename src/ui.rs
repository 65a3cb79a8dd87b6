//! Console output helpers

use crate::analyzer::ReplayStep;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// References are opaque strings; fall back to the full reference when the
/// 8-byte cut would split a char.
fn short_reference(reference: &str) -> &str {
    reference.get(..8).unwrap_or(reference)
}

/// One diagnostic line per fold step: position, short reference, commit
/// time (UTC epoch seconds), resulting version, and the classification.
pub fn display_replay_step(step: &ReplayStep, timestamp: i64) {
    let short_ref = short_reference(&step.reference);
    println!(
        "  {} {} @{} version={} {}",
        style(format!("#{}", step.position)).dim(),
        short_ref,
        timestamp,
        style(step.version.to_string()).bold(),
        style(step.classification.to_string()).cyan(),
    );
}

pub fn display_skipped(stage: &str, reason: &str) {
    println!(
        "{} skipping {} ({})",
        style("→").yellow(),
        stage,
        reason
    );
}
