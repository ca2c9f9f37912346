use clap::Parser;
use sheet_export::ExportError;
use sheet_export::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(e) = commands::shared::setup_logging(&args) {
        eprintln!("Failed to initialise logging: {}", e);
        process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(ExportError::Interrupted {
                    reason: "Export interrupted by user".to_string(),
                })
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            let error = anyhow::Error::new(error);
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Resolves on CTRL+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
