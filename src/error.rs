use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning a scene file into entities.
///
/// A failure aborts the load in progress; entities created before it stay in
/// the registry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed scene file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed data for component '{name}': {source}")]
    Component {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),
}
