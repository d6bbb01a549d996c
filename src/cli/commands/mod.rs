//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`], which resolves the project root and config
//! override once for all subcommands.

pub mod analyze;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod harness;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
