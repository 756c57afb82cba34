use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trailpost_client::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_env_var("TRAILPOST_CLI_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    match cli::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
