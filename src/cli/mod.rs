//! cli
//!
//! Command-line entry point for kryptos.
//!
//! # Responsibilities
//!
//! - Parse flags and initialize logging
//! - Load configurations from `./configs`
//! - Locate and probe `kubeseal`
//! - Run the terminal workflow and hand a submitted form to the
//!   [`crate::engine`]
//!
//! # Exit Behavior
//!
//! A submitted secret or a deliberate quit returns `Ok(())`. Every other
//! failure is returned as an error for `main` to print.

pub mod args;

pub use args::Cli;

use std::io;

use anyhow::{bail, Context as _, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::core::config::{self, DEFAULT_CONFIG_DIR};
use crate::core::paths::RepoPaths;
use crate::engine::{self, Context};
use crate::sealer::{Kubeseal, Sealer};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::Stdin;
use crate::ui::terminal::{self, Outcome};
use crate::ui::workflow::Workflow;

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug level.
fn init_logging(debug: bool) {
    let default = if debug { "kryptos=debug" } else { "kryptos=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = Context {
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        cwd: std::env::current_dir().context("could not determine working directory")?,
    };

    let config_dir = ctx.cwd.join(DEFAULT_CONFIG_DIR);
    let loaded = config::load_dir(&config_dir).context("failed to load configurations")?;
    for warning in &loaded.warnings {
        output::warn(warning, ctx.verbosity);
    }
    if loaded.apps.is_empty() {
        bail!("no valid configurations found in {}", config_dir.display());
    }
    output::debug(
        format!("loaded {} application(s)", loaded.apps.len()),
        ctx.verbosity,
    );

    let sealer = Kubeseal::locate()?;
    output::debug(
        format!("using {}", sealer.binary().display()),
        ctx.verbosity,
    );
    if let Err(err) = sealer.check_connectivity() {
        output::warn(
            format!("{}. Proceeding anyway...", err),
            ctx.verbosity,
        );
    }

    let mut stdin = Stdin::new();
    debug!(interactive = stdin.is_interactive(), "starting workflow");

    let workflow = Workflow::new(&loaded.apps);
    let outcome = terminal::run(workflow, &mut stdin, &mut io::stdout())?;

    match outcome {
        Outcome::Quit => {
            info!("quit without generating");
            Ok(())
        }
        Outcome::Submit(submission) => {
            let paths = RepoPaths::discover(&ctx.cwd);
            let path = engine::submit(
                &sealer,
                &paths,
                submission.app,
                submission.secret,
                &submission.entered,
            )
            .with_context(|| format!("could not generate {}", submission.secret.name))?;

            output::success(
                format!("\nSuccessfully generated {}", path.display()),
                ctx.verbosity,
            );
            Ok(())
        }
    }
}
