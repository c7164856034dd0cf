use clap::Parser;
use ts_codegen_cli::{Args, init_tracing, run};

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();
    let code = run(args).await;
    std::process::exit(code);
}
