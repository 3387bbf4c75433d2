//! sgdb-sync - Set SteamGridDB artwork for non-Steam shortcuts
//!
//! Usage:
//!   sgdb-sync                 Download artwork for every shortcut
//!   sgdb-sync --list          Show shortcuts and their existing artwork
//!   sgdb-sync --game <text>   Only process matching shortcuts
//!   sgdb-sync --help          Show help

use tracing_subscriber::EnvFilter;

mod cli;
mod setup;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Check for --help / --version
    if args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("sgdb-sync {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(1);
        }
    };

    init_logging(options.verbose);

    if let Err(e) = cli::run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    // Diagnostics go to stderr so stdout carries only the console narrative
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
