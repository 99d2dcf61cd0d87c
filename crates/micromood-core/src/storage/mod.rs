mod config;
pub mod history;

pub use config::{CompanionConfig, Config, LoggingConfig, SentimentConfig, StorageConfig};
pub use history::{
    ClearConfirmation, ClearRequest, HistoryBackend, JsonFileBackend, Loaded, MoodHistory,
    MoodStore,
};

use std::path::PathBuf;

use crate::error::StorageError;

/// Environment variable overriding the data directory entirely.
pub const DATA_DIR_ENV: &str = "MICROMOOD_DATA_DIR";

/// Returns `~/.config/micromood[-dev]/` based on MICROMOOD_ENV.
///
/// Set MICROMOOD_ENV=dev to use development data directory, or
/// MICROMOOD_DATA_DIR to point somewhere else altogether.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MICROMOOD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("micromood-dev")
            } else {
                base_dir.join("micromood")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
