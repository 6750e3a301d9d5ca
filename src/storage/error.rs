//! Storage access errors.

use std::path::PathBuf;

/// Error returned when the persistent key-value store cannot be used.
///
/// The theme controller never surfaces these: reads degrade to "no
/// preference" and writes become best-effort. They exist so backends can
/// report what went wrong and callers outside the controller can decide.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store is disabled or not reachable in this context
    /// (privacy mode, sandboxed frame, missing window).
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a string map.
    #[error("storage file {path} is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The host store rejected the operation (quota exceeded and similar).
    #[error("storage backend error: {0}")]
    Backend(String),
}
