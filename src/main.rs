use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wg_addpeer::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str().to_lowercase()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::commands::cmd_add_peer(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
