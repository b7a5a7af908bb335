//! ui
//!
//! Operator interaction.
//!
//! # Modules
//!
//! - [`workflow`] - List, Details and Form as a pure state machine
//! - [`render`] - Text rendering of the current view
//! - [`terminal`] - Line-oriented driver feeding input into the workflow
//! - [`prompts`] - Plain and masked line input
//! - [`output`] - Operator messages and verbosity
//!
//! # Design
//!
//! All terminal I/O goes through [`terminal`] and [`output`]. The workflow
//! itself is pure so its transitions can be replayed in tests.

pub mod output;
pub mod prompts;
pub mod render;
pub mod terminal;
pub mod workflow;
