//! Command-line interface for runthis.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AnalyzeArgs, Cli, Commands, CompletionsArgs, HarnessArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
