//! Generated file output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CliError;

/// Notice placed above every generated module.
pub const GENERATED_TIP: &str = "/*\n *  this file is generated by ts-codegen.\n *  please do not modify it manually.\n */\n";

/// `{file_name}.ts` for a single source, `{file_name}-{n}.ts` (1-based)
/// when several sources share the output directory.
pub fn output_path(output_dir: &Path, file_name: &str, index: usize, total: usize) -> PathBuf {
    if total > 1 {
        output_dir.join(format!("{file_name}-{}.ts", index + 1))
    } else {
        output_dir.join(format!("{file_name}.ts"))
    }
}

/// Headers, the generated-file notice, then the module.
pub fn render_file(file_headers: &[String], module: &str) -> String {
    let mut contents = String::new();
    for header in file_headers {
        contents.push_str(header);
        contents.push('\n');
    }
    contents.push_str(GENERATED_TIP);
    contents.push('\n');
    contents.push_str(module);
    contents
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote generated file.");
    Ok(())
}
