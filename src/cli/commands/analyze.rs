//! Analyze command implementation.
//!
//! `runthis analyze [PATH]` runs the README, manifest, plan and planner
//! stages over a checkout that is already on disk.

use std::path::{Path, PathBuf};

use crate::cli::args::AnalyzeArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::fetch::{CloneResult, RepositorySpec};
use crate::harness::{Analyzer, Stage};
use crate::plan::ActionPlanGenerator;
use crate::planner::build_planner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::harness::config_failure;

/// The analyze command implementation.
pub struct AnalyzeCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: AnalyzeArgs,
}

impl AnalyzeCommand {
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: AnalyzeArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Directory being analyzed.
    pub fn target(&self) -> PathBuf {
        match &self.args.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.project_root.join(path),
            None => self.project_root.clone(),
        }
    }

    /// Name recorded for the checkout: `--repo`, else `local/<dir name>`.
    pub fn repository(&self) -> Result<RepositorySpec> {
        if let Some(name) = &self.args.repo {
            return RepositorySpec::parse(name);
        }
        let dir = self
            .target()
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| "checkout".to_string());
        Ok(RepositorySpec::new(&format!("local/{}", dir), ""))
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self.target();
        if !target.is_dir() {
            ui.error(&format!("Not a directory: {}", target.display()));
            return Ok(CommandResult::failure(1));
        }

        let mut config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(c) => c,
            Err(e) => return config_failure(ui, e),
        };
        if let Some(kind) = self.args.planner {
            config.planner.kind = kind;
        }
        if let Some(extractor) = self.args.extractor {
            config.extractor = extractor;
        }

        let repo = match self.repository() {
            Ok(r) => r,
            Err(e) => return config_failure(ui, e),
        };
        let planner = match build_planner(&config.planner) {
            Ok(p) => p,
            Err(e) => return config_failure(ui, e.into()),
        };

        let generator = ActionPlanGenerator::new(config.extractor.build())
            .with_max_run_commands(config.max_run_commands)
            .with_clone_base_url(&config.clone_base_url);
        let analyzer = Analyzer::new(generator).with_planner(planner);

        tracing::debug!("Analyzing {} at {}", repo.name, target.display());
        let result = analyzer.analyze(&repo, CloneResult::already_present(target.clone()), &target);

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            ui.show_header(&format!("runthis analyze {}", repo.name));
            display::show_analysis(ui, &result);
        }

        match &result.failure {
            None => Ok(CommandResult::success()),
            Some(failure) => {
                if !self.args.json {
                    match failure.stage {
                        Stage::Readme => ui.error("No README found; cannot determine how to run"),
                        _ => ui.error(&failure.reason),
                    }
                }
                Ok(CommandResult::failure(1))
            }
        }
    }
}
