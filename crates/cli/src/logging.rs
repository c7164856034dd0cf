use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "TS_CODEGEN_LOG";

const LOGGED_CRATES: [&str; 2] = ["ts_codegen_core", "ts_codegen_cli"];

pub fn init_tracing() {
    // TS_CODEGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "ts_codegen_core=debug"
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => crate_filter(level),
        Some(spec) => spec.to_string(),
        None => crate_filter("info"),
    }
}

fn crate_filter(level: &str) -> String {
    LOGGED_CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
