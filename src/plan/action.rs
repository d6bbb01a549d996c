//! Dry-run action plans.

use serde::{Deserialize, Serialize};

use super::extract::{KeywordExtractor, RunCommandExtractor};
use crate::detection::{DependencySet, Ecosystem};
use crate::fetch::DEFAULT_BASE_URL;

/// Default cap on run-command candidates.
pub const DEFAULT_MAX_RUN_COMMANDS: usize = 5;

/// Install command for an ecosystem.
pub fn install_command(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Python => "pip install -r requirements.txt",
        Ecosystem::Node => "npm install",
        Ecosystem::Rust => "cargo build",
        Ecosystem::Go => "go mod download",
        Ecosystem::Cpp => "make / cmake",
        Ecosystem::Other => "make",
    }
}

/// Placeholder recorded when an ecosystem was not detected.
pub fn no_deps_placeholder(ecosystem: Ecosystem) -> String {
    format!("No {} deps", ecosystem.label())
}

/// Install command (or placeholder) per ecosystem. Never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallCommands {
    pub python: String,
    pub node: String,
    pub rust: String,
    pub go: String,
    pub cpp: String,
}

impl InstallCommands {
    /// Build from a dependency set.
    pub fn from_dependencies(deps: &DependencySet) -> Self {
        let pick = |ecosystem: Ecosystem| {
            if deps.has(ecosystem) {
                install_command(ecosystem).to_string()
            } else {
                no_deps_placeholder(ecosystem)
            }
        };

        Self {
            python: pick(Ecosystem::Python),
            node: pick(Ecosystem::Node),
            rust: pick(Ecosystem::Rust),
            go: pick(Ecosystem::Go),
            cpp: pick(Ecosystem::Cpp),
        }
    }

    /// Entry for `ecosystem` (`Other` has no dedicated entry).
    pub fn get(&self, ecosystem: Ecosystem) -> Option<&str> {
        match ecosystem {
            Ecosystem::Python => Some(self.python.as_str()),
            Ecosystem::Node => Some(self.node.as_str()),
            Ecosystem::Rust => Some(self.rust.as_str()),
            Ecosystem::Go => Some(self.go.as_str()),
            Ecosystem::Cpp => Some(self.cpp.as_str()),
            Ecosystem::Other => None,
        }
    }
}

/// What the tool would do for a repository, without doing any of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// The clone command that would run.
    pub clone: String,

    /// Install command per ecosystem.
    pub dependencies: InstallCommands,

    /// Run-command candidates from the README, first-seen order.
    pub run_commands: Vec<String>,

    /// Narration of the dry-run steps.
    pub dry_run_notes: Vec<String>,
}

impl ActionPlan {
    /// The command that would be executed, if any was found.
    pub fn primary_run_command(&self) -> Option<&str> {
        self.run_commands.first().map(String::as_str)
    }
}

/// Builds [`ActionPlan`]s. Has no side effects.
pub struct ActionPlanGenerator {
    extractor: Box<dyn RunCommandExtractor>,
    max_run_commands: usize,
    clone_base_url: String,
}

impl Default for ActionPlanGenerator {
    fn default() -> Self {
        Self::new(Box::new(KeywordExtractor))
    }
}

impl ActionPlanGenerator {
    /// Create a generator using `extractor` for run commands.
    pub fn new(extractor: Box<dyn RunCommandExtractor>) -> Self {
        Self {
            extractor,
            max_run_commands: DEFAULT_MAX_RUN_COMMANDS,
            clone_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Keep at most `max` run-command candidates.
    pub fn with_max_run_commands(mut self, max: usize) -> Self {
        self.max_run_commands = max;
        self
    }

    /// Narrate clones from a different host.
    pub fn with_clone_base_url(mut self, base_url: &str) -> Self {
        self.clone_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Name of the configured extractor.
    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    /// Combine README text and detected manifests into a plan.
    pub fn generate(&self, repo: &str, readme: &str, deps: &DependencySet) -> ActionPlan {
        let mut run_commands = self.extractor.extract(readme);
        run_commands.truncate(self.max_run_commands);

        let first = run_commands
            .first()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let dry_run_notes = vec![
            format!("[DRY-RUN] Would clone {}", repo),
            "[DRY-RUN] Would install dependencies based on detected manifests".to_string(),
            format!("[DRY-RUN] Would execute: {}", first),
            "[DRY-RUN] No actual system changes made - test mode enabled".to_string(),
        ];

        ActionPlan {
            clone: format!("git clone --depth 1 {}/{}.git", self.clone_base_url, repo),
            dependencies: InstallCommands::from_dependencies(deps),
            run_commands,
            dry_run_notes,
        }
    }
}
