//! Models command - list the model catalog

use anyhow::Result;
use chared::store::ModelStore;
use serde::Serialize;

#[derive(Serialize)]
struct ModelEntry {
    id: String,
    path: String,
}

pub fn run(store: &ModelStore, format: &str) -> Result<()> {
    let entries: Vec<ModelEntry> = store
        .list_models()?
        .into_iter()
        .filter_map(|id| {
            let path = store.model_path(&id)?;
            Some(ModelEntry {
                id,
                path: path.display().to_string(),
            })
        })
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No models found in {}", store.dir().display());
        return Ok(());
    }
    for entry in &entries {
        println!("{:<20} {}", entry.id, entry.path);
    }
    Ok(())
}

/// One-line hint naming the installed models, for error messages.
pub fn available_hint(store: &ModelStore) -> String {
    match store.list_models() {
        Ok(models) if !models.is_empty() => format!("Available models: {}", models.join(", ")),
        _ => format!("No models installed in {}", store.dir().display()),
    }
}
