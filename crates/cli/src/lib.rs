//! Command-line driver for `ts-codegen-core`.
//!
//! Reads `ts-codegen.config.json`, loads local documents and fetches remote
//! ones, then writes one generated TypeScript module per source.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod writer;

pub use cli::{Args, run};
pub use error::CliError;
pub use logging::init_tracing;
