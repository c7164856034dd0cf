//! `ts-codegen.config.json` loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "ts-codegen.config.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".output";
pub const DEFAULT_FILE_NAME: &str = "request";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Generator settings. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory the generated files go to.
    pub output: PathBuf,
    /// Lines written verbatim before the generated module.
    pub file_headers: Vec<String>,
    /// Remote fetch timeout in milliseconds.
    pub timeout: u64,
    /// Local `.json` / `.yml` / `.yaml` documents.
    pub data: Vec<PathBuf>,
    /// Remote document URLs.
    pub clients: Vec<String>,
    /// Base name of the generated file, without extension.
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT_MS,
            data: Vec::new(),
            clients: Vec::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file found, using defaults.");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CliError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of documents this config asks for.
    pub fn source_count(&self) -> usize {
        self.data.len() + self.clients.len()
    }
}
