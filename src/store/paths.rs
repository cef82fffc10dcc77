//! Models directory resolution - uses ~/.local/share/chared/models/ unless overridden

use std::path::{Path, PathBuf};

/// Platform default location of the model catalog.
/// `~/.local/share/chared/models` on Linux, the platform data dir elsewhere,
/// `./models` when no data dir can be determined.
pub fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("chared").join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

/// Pick the models directory: explicit flag, then configuration (which
/// already includes `CHARED_MODELS_DIR`), then the platform default.
pub fn resolve_models_dir(explicit: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    explicit
        .or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(default_models_dir)
}
