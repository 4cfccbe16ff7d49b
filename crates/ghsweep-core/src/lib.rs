//! Core types, traits, and utilities for ghsweep.
//!
//! This crate provides the foundational abstractions used across all ghsweep crates:
//! - [`IOStreams`] for terminal I/O handling
//! - [`SweepConfig`] for file-based configuration
//! - [`Prompter`](prompter::Prompter) trait for interactive prompts
//! - Preflight checks, table formatting, and color schemes

pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod instance;
pub mod iostreams;
pub mod kind;
pub mod preflight;
pub mod prompter;
pub mod table;
#[cfg(test)]
pub mod test_utils;

pub use config::SweepConfig;
pub use errors::ConfigError;
pub use iostreams::IOStreams;
pub use kind::ResourceKind;
