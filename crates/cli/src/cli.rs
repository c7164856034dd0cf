use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing::{debug, info};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::CliError;
use crate::fetch::{build_client, fetch_document};
use crate::loader::load_document;
use crate::writer::{output_path, render_file, write_output};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ts-codegen",
    version,
    about = "Generate TypeScript types and request hooks from OpenAPI documents"
)]
pub struct Args {
    /// Config file path.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Authorization header sent to every remote client.
    #[arg(short, long, value_name = "TOKEN")]
    pub authorization: Option<String>,

    /// Output directory, overrides the config file.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// A document to generate from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Run the generator and return the process exit code.
pub async fn run(args: Args) -> i32 {
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", style("✗").red());
            return 1;
        }
    };

    let failures = run_sources(&args, &config).await;
    i32::from(failures > 0)
}

/// Generate every configured source, reporting each outcome. Returns the
/// number of failed sources.
async fn run_sources(args: &Args, config: &Config) -> usize {
    if config.source_count() == 0 {
        info!(config = %args.config.display(), "No data files or clients configured.");
        return 0;
    }

    let output_dir = args.output.clone().unwrap_or_else(|| config.output.clone());
    let sources: Vec<_> = config
        .data
        .iter()
        .cloned()
        .map(Source::File)
        .chain(config.clients.iter().cloned().map(Source::Url))
        .collect();

    let client = if config.clients.is_empty() {
        None
    } else {
        match build_client(config.timeout, args.authorization.as_deref()) {
            Ok(client) => Some(client),
            Err(err) => {
                eprintln!("{} {err}", style("✗").red());
                return config.clients.len();
            }
        }
    };

    let mut failures = 0;
    for (index, source) in sources.iter().enumerate() {
        let path = output_path(&output_dir, &config.file_name, index, sources.len());
        match generate_source(source, client.as_ref(), config, &path).await {
            Ok(()) => println!(
                "  {} {} -> {}",
                style("✓").green(),
                source.label(),
                style(path.display()).cyan()
            ),
            Err(err) => {
                failures += 1;
                eprintln!("  {} {err}", style("✗").red());
            }
        }
    }

    debug!(total = sources.len(), failures, "Finished generating.");
    failures
}

async fn generate_source(
    source: &Source,
    client: Option<&reqwest::Client>,
    config: &Config,
    path: &std::path::Path,
) -> Result<(), CliError> {
    let document = match (source, client) {
        (Source::File(file), _) => load_document(file)?,
        (Source::Url(url), Some(client)) => fetch_document(client, url).await?,
        (Source::Url(url), None) => {
            return Err(CliError::Fetch {
                url: url.clone(),
                message: "no HTTP client available".to_string(),
            });
        }
    };

    let module = ts_codegen_core::generate(&document);
    write_output(path, &render_file(&config.file_headers, &module))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PETS: &str = r##"{
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "responses": {
                        "200": { "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } } } }
                    }
                }
            }
        },
        "components": { "schemas": { "Pet": { "type": "object", "properties": { "name": { "type": "string" } } } } }
    }"##;

    fn args(config: PathBuf, output: Option<PathBuf>) -> Args {
        Args {
            config,
            authorization: None,
            output,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "ts-codegen",
            "-c",
            "custom.json",
            "-a",
            "Bearer t",
            "-o",
            "gen",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("custom.json"));
        assert_eq!(args.authorization.as_deref(), Some("Bearer t"));
        assert_eq!(args.output, Some(PathBuf::from("gen")));

        let defaults = Args::try_parse_from(["ts-codegen"]).unwrap();
        assert_eq!(defaults.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(defaults.output, None);
    }

    #[tokio::test]
    async fn test_generates_local_file() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("pets.json");
        fs::write(&document, PETS).unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        let contents = serde_json::json!({
            "data": [document],
            "fileHeaders": ["/* eslint-disable */"],
        });
        fs::write(&config, contents.to_string()).unwrap();

        let out = dir.path().join("out");
        assert_eq!(run(args(config, Some(out.clone()))).await, 0);

        let generated = fs::read_to_string(out.join("request.ts")).unwrap();
        assert!(generated.starts_with("/* eslint-disable */\n"));
        assert!(generated.contains("export const useListPetsRequest"));
        assert!(generated.contains("export interface IPet {\n  name?: string;\n}\n"));
    }

    #[tokio::test]
    async fn test_failed_source_does_not_stop_batch() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("pets.json");
        fs::write(&good, PETS).unwrap();
        let bad = dir.path().join("pets.txt");
        fs::write(&bad, PETS).unwrap();

        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        let contents = serde_json::json!({ "data": [bad, good], "fileName": "api" });
        fs::write(&config, contents.to_string()).unwrap();

        let out = dir.path().join("out");
        assert_eq!(run(args(config, Some(out.clone()))).await, 1);
        assert!(!out.join("api-1.ts").exists());
        assert!(out.join("api-2.ts").exists());
    }

    #[tokio::test]
    async fn test_malformed_config_exits_with_error() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "not json").unwrap();

        assert_eq!(run(args(config, None)).await, 1);
    }

    #[tokio::test]
    async fn test_nothing_configured() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join(DEFAULT_CONFIG_FILE);
        assert_eq!(run(args(config, Some(dir.path().join("out")))).await, 0);
        assert!(!dir.path().join("out").exists());
    }
}
