//! Learn command - build a model from a sample text

use anyhow::{Context, Result};
use chared::config::TrainingManifest;
use chared::store::ModelStore;
use chared::training;
use console::style;
use std::path::Path;

pub fn run(sample: &Path, manifest: &Path, output: &Path) -> Result<()> {
    let manifest = TrainingManifest::load(manifest)
        .with_context(|| format!("Failed to load training manifest {}", manifest.display()))?;

    let text = std::fs::read_to_string(sample)
        .with_context(|| format!("Failed to read sample {} (must be UTF-8)", sample.display()))?;

    let (model, report) = training::learn(&text, &manifest).context("Training failed")?;
    ModelStore::save(&model, output)
        .with_context(|| format!("Failed to save model to {}", output.display()))?;

    println!(
        "{} Learned {} encodings from {} characters",
        style("✓").green(),
        report.encodings.len(),
        report.sample_chars
    );
    for stats in &report.encodings {
        if report.reduced {
            println!(
                "  {:<16} {:>5} chars, {:>5} after reduction",
                stats.encoding, stats.trained, stats.kept
            );
        } else {
            println!("  {:<16} {:>5} chars", stats.encoding, stats.trained);
        }
    }
    println!("  Preference order: {}", manifest.encodings.as_slice().join(", "));
    println!("\n  Model saved to: {}", style(output.display()).cyan());

    Ok(())
}
