//! dailydose CLI entrypoint

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dailydose::cli::Cli;
use dailydose::config::ResolvedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ResolvedConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    // Single top-level catch: anything a command did not handle itself is
    // logged with full context and mapped to exit 1
    match cli.execute(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "critical error");
            eprintln!("\nCRITICAL ERROR: {e:#}\n");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with a console layer and a log-file layer
fn init_tracing(config: &ResolvedConfig) {
    let file_layer = std::fs::create_dir_all(&config.log_dir)
        .ok()
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_dir.join("run.log"))
                .ok()
        })
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file))
        });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .init();
}
