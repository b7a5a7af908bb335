//! engine
//!
//! Turns a completed form into a SealedSecret on disk.
//!
//! # Pipeline
//!
//! ```text
//! resolve keywords -> build document -> seal -> resolve secrets dir -> write
//! ```
//!
//! # Invariants
//!
//! - Plaintext never touches the filesystem; it exists in memory and on
//!   `kubeseal`'s stdin only
//! - Any failure aborts the submission before the output file is written
//! - Nothing is retried

pub mod submit;

pub use submit::{resolve_values, submit, SubmitError};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Working directory the tool was started in.
    pub cwd: PathBuf,
}
