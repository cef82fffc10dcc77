//! Directory-backed model catalog

use super::{load_model, save_model, StoreError, StoreResult, MODEL_EXTENSION};
use crate::detector::EncodingModel;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A directory of `<id>.edm` model files
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids of all models in the catalog, sorted. A missing directory is an
    /// empty catalog.
    pub fn list_models(&self) -> StoreResult<Vec<String>> {
        if !self.dir.is_dir() {
            tracing::debug!("Models directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let mut models = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(MODEL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                models.push(stem.to_string());
            }
        }
        models.sort();
        Ok(models)
    }

    /// Path of the model with `id`, or `None` if the catalog has no such model.
    pub fn model_path(&self, id: &str) -> Option<PathBuf> {
        let path = self.dir.join(format!("{}.{}", id, MODEL_EXTENSION));
        path.is_file().then_some(path)
    }

    /// Load a model by catalog id, or from a file when `id_or_path` looks like
    /// a path (contains a separator or ends in `.edm`).
    pub fn load(&self, id_or_path: &str) -> StoreResult<EncodingModel> {
        if is_model_path(id_or_path) {
            return Self::load_file(Path::new(id_or_path));
        }
        let path = self
            .model_path(id_or_path)
            .ok_or_else(|| StoreError::NotFound(id_or_path.to_string()))?;
        Self::load_file(&path)
    }

    pub fn load_file(path: &Path) -> StoreResult<EncodingModel> {
        let bytes = std::fs::read(path)?;
        let model = load_model(&bytes)?;
        tracing::debug!(
            "Loaded model {} ({} encodings)",
            path.display(),
            model.len()
        );
        Ok(model)
    }

    /// Write `model` to `path` atomically, creating parent directories.
    pub fn save(model: &EncodingModel, path: &Path) -> StoreResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let bytes = save_model(model)?;
        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(&bytes)?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Save `model` into the catalog under `id`.
    pub fn save_as(&self, model: &EncodingModel, id: &str) -> StoreResult<PathBuf> {
        let path = self.dir.join(format!("{}.{}", id, MODEL_EXTENSION));
        Self::save(model, &path)?;
        Ok(path)
    }
}

fn is_model_path(arg: &str) -> bool {
    arg.contains(std::path::is_separator)
        || Path::new(arg).extension().and_then(|e| e.to_str()) == Some(MODEL_EXTENSION)
}
