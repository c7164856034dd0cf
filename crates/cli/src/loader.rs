//! Local document loading.

use std::path::Path;

use tracing::debug;
use ts_codegen_core::OpenApiDocument;

use crate::error::CliError;

/// Read and parse a local document; the extension picks the parser.
pub fn load_document(path: &Path) -> Result<OpenApiDocument, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let is_json = match extension.as_deref() {
        Some("json") => true,
        Some("yml" | "yaml") => false,
        _ => {
            return Err(CliError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Read local document.");

    let parsed = if is_json {
        OpenApiDocument::from_json(&contents)
    } else {
        OpenApiDocument::from_yaml(&contents)
    };
    parsed.map_err(|source| CliError::Document {
        origin: path.display().to_string(),
        source,
    })
}
