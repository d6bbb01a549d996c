//! runthis - infer how to install and run a repository, without running it.
//!
//! runthis looks at a checkout's manifest files and README, derives install
//! commands and run-command candidates, and optionally asks a planner (a
//! deterministic stub or an OpenAI-compatible model) for a plan. The
//! harness drives that logic over a list of sample repositories in
//! dry-run mode and reports how often it succeeds.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`detection`] - Manifest and README detection
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Shallow cloning into the harness workspace
//! - [`harness`] - Batch orchestration, persistence and reports
//! - [`plan`] - Action plan generation and run-command extraction
//! - [`planner`] - Planning service capability and implementations
//! - [`shell`] - Timeout-bounded process execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use runthis::detection::DependencySet;
//! use runthis::plan::ActionPlanGenerator;
//!
//! let deps = DependencySet {
//!     node: true,
//!     manifests: vec!["package.json".to_string()],
//!     ..Default::default()
//! };
//! let plan = ActionPlanGenerator::default().generate("octo/app", "npm run build\n", &deps);
//!
//! assert_eq!(plan.dependencies.node, "npm install");
//! assert_eq!(plan.run_commands, vec!["npm run build"]);
//! assert_eq!(plan.dry_run_notes[2], "[DRY-RUN] Would execute: npm run build");
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod fetch;
pub mod harness;
pub mod plan;
pub mod planner;
pub mod shell;
pub mod ui;

pub use error::{Result, RunthisError};
