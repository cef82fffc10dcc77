//! Detect command - classify files against a language model

use anyhow::{Context, Result};
use chared::charset;
use chared::{Candidate, EncodingModel, ModelStore};
use console::style;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Detection result for one file
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    encodings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<Candidate>>,
}

fn detect_file(model: &EncodingModel, path: &Path, all: bool) -> Result<FileReport> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = charset::widen(&bytes);

    let (encodings, candidates) = if all {
        let candidates = model.classify_candidates(&text, &bytes);
        (Candidate::top_tied(&candidates), Some(candidates))
    } else {
        (model.classify(&text, &bytes), None)
    };

    tracing::debug!("{}: {:?}", path.display(), encodings);
    Ok(FileReport {
        path: path.display().to_string(),
        encodings,
        candidates,
    })
}

pub fn run(store: &ModelStore, model_id: &str, files: &[PathBuf], all: bool, format: &str) -> Result<()> {
    let model = store
        .load(model_id)
        .with_context(|| format!("Failed to load model '{}' from {}", model_id, store.dir().display()))?;
    if model.is_empty() {
        tracing::warn!("Model '{}' has no trained encodings", model_id);
    }

    // Classification only reads the model, so files are processed in parallel
    let results: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|path| detect_file(&model, path, all))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("{} {:#}", style("error:").red().bold(), e);
                failed += 1;
            }
        }
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_text(report);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) could not be read", failed, files.len());
    }
    Ok(())
}

fn print_text(report: &FileReport) {
    let result = if report.encodings.is_empty() {
        "???".to_string()
    } else {
        report.encodings.join(" ")
    };
    println!("{}: {}", report.path, style(result).green());

    if let Some(candidates) = &report.candidates {
        for c in candidates {
            println!(
                "    {:<16} score={:<12} rank={}",
                c.encoding,
                c.score,
                c.rank
            );
        }
    }
}
