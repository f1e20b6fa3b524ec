//! This is the main entry point for apporte.

use apporte::cli;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("APPORTE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match cli::parse(None) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            1
        }
    };
    std::process::exit(code);
}
