//! Error types for the command-line driver.

use std::path::PathBuf;

use thiserror::Error;
use ts_codegen_core::DocumentError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported document format: {} (expected .json, .yml or .yaml)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("Failed to parse {origin}: {source}")]
    Document {
        origin: String,
        #[source]
        source: DocumentError,
    },
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
