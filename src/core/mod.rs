//! core
//!
//! Domain model, configuration loading and document assembly.
//!
//! # Modules
//!
//! - [`types`] - AppConfig, Secret, SecretField
//! - [`config`] - Configuration discovery and the v1/legacy schemas
//! - [`paths`] - Repository root discovery and output directory routing
//! - [`manifest`] - Plaintext Secret document builder
//!
//! # Design Principles
//!
//! - Every schema version normalizes into one model
//! - Nothing in this module talks to `kubeseal` or the terminal
//! - Plaintext documents are built in memory only

pub mod config;
pub mod manifest;
pub mod paths;
pub mod types;
