//! kryptos - Interactive SealedSecret generator
//!
//! kryptos reads per-application secret definitions from a configuration
//! directory, walks an operator through filling in the values, and writes a
//! `SealedSecret` produced by the external `kubeseal` binary into the
//! application's `secrets/` directory.
//!
//! # Architecture
//!
//! - [`cli`] - Entry point (parses args, wires the pieces together)
//! - [`engine`] - Submission pipeline: resolve → build → seal → write
//! - [`core`] - Config model and loading, path resolution, document builder
//! - [`secrets`] - Cryptographically secure value generation
//! - [`sealer`] - Abstraction over the external encryption tool
//! - [`ui`] - Workflow state machine, rendering and the terminal driver
//!
//! # Invariants
//!
//! 1. Plaintext secret material is never written to disk
//! 2. Every generated value comes from the operating system CSPRNG
//! 3. The sealed resource's name and namespace are passed explicitly to
//!    `kubeseal`, never inferred from the piped document

pub mod cli;
pub mod core;
pub mod engine;
pub mod sealer;
pub mod secrets;
pub mod ui;
