use std::path::PathBuf;

/// Errors produced by core `ffs` operations.
#[derive(Debug, thiserror::Error)]
pub enum FfsError {
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid ignore pattern `{pattern}`: {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to compile ignore patterns [{patterns}]: {source}")]
    IgnoreSet {
        patterns: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read config: {0}")]
    ConfigRead(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
