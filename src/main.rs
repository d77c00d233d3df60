use clap::Parser;
use scopus_translate::config::load_env_file;
use scopus_translate::{AppError, CliArgs};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before tracing init so RUST_LOG from .env applies
    if let Err(e) = load_env_file() {
        let e = AppError::from(e);
        eprintln!("Error: {}", e);
        return ExitCode::from(e.exit_code());
    }

    // Diagnostics go to stderr; stdout may be carrying CSV
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match scopus_translate::run(args).await {
        Ok(Some(path)) => {
            println!("Saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
