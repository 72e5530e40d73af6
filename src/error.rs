use std::path::PathBuf;

use thiserror::Error;

/// Failures at the crate boundary. Generation itself never fails once the
/// settings have been validated.
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("invalid generation settings: {0}")]
    InvalidSettings(String),

    #[error("invalid dungeon data: {0}")]
    InvalidData(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
