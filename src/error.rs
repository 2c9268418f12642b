use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading an index file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read index file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse index JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected a top-level JSON object")]
    NotAnObject,

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Index has no clusters; statistics are undefined")]
    EmptyInput,

    #[error("Index is inconsistent: {centroids} centroids but {clusters} clusters")]
    Inconsistent { centroids: usize, clusters: usize },

    #[error("Histogram needs at least one bin")]
    InvalidBins,

    #[error("Failed to render histogram: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
