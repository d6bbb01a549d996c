//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ExitPolicyKind, HarnessConfig, PlannerKind};
use crate::error::Result;
use crate::fetch::RepositorySpec;
use crate::plan::ExtractorKind;

/// runthis - Figure out how to install and run a repository, without running it.
#[derive(Debug, Parser)]
#[command(name = "runthis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .runthis/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show per-repository detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clone and analyze the configured repositories (default)
    Harness(HarnessArgs),

    /// Analyze a repository that is already on disk
    Analyze(AnalyzeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `harness` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HarnessArgs {
    /// Workspace for logs, reports and clones
    #[arg(long, env = "RUNTHIS_TEST_DIR")]
    pub test_dir: Option<PathBuf>,

    /// Exit policy: always-succeed or threshold
    #[arg(long)]
    pub exit_policy: Option<ExitPolicyKind>,

    /// Minimum clone success rate in percent (threshold policy)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Analyze only these repositories (owner/name, repeatable)
    #[arg(long = "repo", value_delimiter = ',')]
    pub repos: Vec<String>,

    /// Planner: none, stub or openai
    #[arg(long)]
    pub planner: Option<PlannerKind>,

    /// Run-command extractor: keyword or fenced
    #[arg(long)]
    pub extractor: Option<ExtractorKind>,

    /// Maximum run-command candidates per repository
    #[arg(long)]
    pub max_run_commands: Option<usize>,

    /// Per-clone timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Clone from this host instead of GitHub
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl HarnessArgs {
    /// Layer command-line values over a loaded configuration.
    pub fn apply(&self, config: &mut HarnessConfig) -> Result<()> {
        if let Some(dir) = &self.test_dir {
            config.test_dir = dir.clone();
        }
        if let Some(policy) = self.exit_policy {
            config.exit_policy = policy;
        }
        if let Some(threshold) = self.threshold {
            config.success_threshold = threshold;
        }
        if !self.repos.is_empty() {
            config.repositories = self
                .repos
                .iter()
                .map(|name| RepositorySpec::parse(name))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(kind) = self.planner {
            config.planner.kind = kind;
        }
        if let Some(extractor) = self.extractor {
            config.extractor = extractor;
        }
        if let Some(max) = self.max_run_commands {
            config.max_run_commands = max;
        }
        if let Some(timeout) = self.timeout {
            config.clone_timeout_secs = timeout;
        }
        if let Some(base_url) = &self.base_url {
            config.clone_base_url = base_url.clone();
        }
        Ok(())
    }
}

/// Arguments for the `analyze` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AnalyzeArgs {
    /// Checkout to analyze (defaults to the project root)
    pub path: Option<PathBuf>,

    /// Repository name to record (owner/name)
    #[arg(long)]
    pub repo: Option<String>,

    /// Planner: none, stub or openai
    #[arg(long)]
    pub planner: Option<PlannerKind>,

    /// Run-command extractor: keyword or fenced
    #[arg(long)]
    pub extractor: Option<ExtractorKind>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
