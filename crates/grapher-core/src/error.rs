// File: crates/grapher-core/src/error.rs
// Summary: Crate-wide error type and Result alias.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrapherError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Error parsing YAML {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML {0} does not contain a mapping")]
    NotAMapping(String),

    #[error("Error parsing CSV file '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid configuration:\n  - {}", .0.join("\n  - "))]
    InvalidConfig(Vec<String>),

    #[error("Data error in '{path}': {message}")]
    Data { path: PathBuf, message: String },

    #[error("Unsupported graph type '{0}'. Supported types: line, bar, scatter")]
    UnsupportedGraphType(String),

    #[error("No data to plot")]
    NoData,

    #[error("Render failed: {0}")]
    Render(String),
}

impl GrapherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn data(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Data { path: path.into(), message: message.into() }
    }

    pub(crate) fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GrapherError>;
