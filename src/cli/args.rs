//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version` / `-V`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only
//!
//! Neither flag changes what the tool does, only what it prints.

use clap::Parser;

/// kryptos - Interactive SealedSecret generator
#[derive(Parser, Debug)]
#[command(name = "kryptos")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Run from a directory containing configs/*.yaml. Secrets are sealed with
kubeseal and written to apps/<app>/secrets/ or infrastructure/<app>/secrets/
in the enclosing repository.

Generator keywords (type them as a value): secure, strong, apikey, passphrase")]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output; only errors are printed
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
