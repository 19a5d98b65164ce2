//! Command-line front end for the drift-sweep engine
//!
//! This crate wires `knotdrift_core` to the outside world:
//! - Argument parsing and subcommand dispatch (`cli`, `commands`)
//! - YAML run configurations and presets (`loader`)
//! - JSON result documents (`report`)
//! - Stderr and optional file logging (`logging`)

pub mod cli;
pub mod commands;
pub mod loader;
pub mod logging;
pub mod report;

pub use cli::{Cli, Command};
pub use logging::init_logging;
