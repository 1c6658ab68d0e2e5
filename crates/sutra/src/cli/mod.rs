//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sutra binary.

mod commands;
mod images;

pub use commands::{Cli, Commands};
pub use images::{fingerprint, load_config, lookup, put};
