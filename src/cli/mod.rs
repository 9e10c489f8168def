//! CLI layer for LDR-RS.
//!
//! Parses the topic with clap and wires configuration, provider, search
//! backend, and research loop together.

pub mod commands;
pub mod parser;

pub use commands::{execute, run_research};
pub use parser::Cli;
