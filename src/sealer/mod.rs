//! sealer
//!
//! Encryption of plaintext Secret documents into SealedSecrets.
//!
//! # Architecture
//!
//! The `Sealer` trait is the only way the rest of the crate reaches the
//! encryption tool. Production code uses [`kubeseal::Kubeseal`]; tests use
//! [`mock::MockSealer`].
//!
//! # Modules
//!
//! - `traits`: Core `Sealer` trait and `SealError`
//! - [`kubeseal`]: Subprocess implementation over the `kubeseal` CLI
//! - [`mock`]: Mock implementation for deterministic testing

pub mod kubeseal;
pub mod mock;
mod traits;

pub use kubeseal::Kubeseal;
pub use traits::*;
