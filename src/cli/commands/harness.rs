//! Harness command implementation.
//!
//! `runthis harness` clones every configured repository, analyzes it in
//! dry-run mode and writes per-repository logs plus one aggregate report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::args::HarnessArgs;
use crate::config::{load_config, validate, HarnessConfig};
use crate::error::{Result, RunthisError};
use crate::harness::{HarnessProgress, Orchestrator};
use crate::ui::{format_duration, SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The harness command implementation.
pub struct HarnessCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: HarnessArgs,
}

impl HarnessCommand {
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: HarnessArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    pub fn args(&self) -> &HarnessArgs {
        &self.args
    }

    /// File configuration with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<HarnessConfig> {
        let mut config = load_config(&self.project_root, self.config_override.as_deref())?;
        self.args.apply(&mut config)?;
        validate(&config)?;
        Ok(config)
    }
}

/// Configuration problems exit with 2; anything else propagates.
pub(crate) fn config_failure(
    ui: &mut dyn UserInterface,
    error: RunthisError,
) -> Result<CommandResult> {
    match error {
        RunthisError::ConfigNotFound { .. }
        | RunthisError::ConfigParseError { .. }
        | RunthisError::ConfigValidationError { .. }
        | RunthisError::InvalidRepository { .. }
        | RunthisError::Planner(_) => {
            ui.error(&error.to_string());
            Ok(CommandResult::failure(2))
        }
        other => Err(other),
    }
}

impl Command for HarnessCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.resolve_config() {
            Ok(c) => c,
            Err(e) => return config_failure(ui, e),
        };

        let orchestrator = match Orchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => return config_failure(ui, e),
        };

        let total = orchestrator.repositories().len();
        if !self.args.json {
            ui.show_header("runthis harness");
            ui.message(&format!(
                "Analyzing {} repositories in {} (dry-run, nothing is installed or executed)",
                total,
                config.test_dir.display()
            ));
            ui.message("");
        }

        let started = Instant::now();
        let json = self.args.json;
        let verbose = ui.output_mode().shows_details();
        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;

        let report = orchestrator.run_with_progress(|event| {
            if json {
                return;
            }
            match event {
                HarnessProgress::RepoStarting { repo, index, total } => {
                    spinner = Some(ui.start_spinner(&format!(
                        "[{}/{}] {}",
                        index + 1,
                        total,
                        repo.name
                    )));
                }
                HarnessProgress::RepoFinished { result } => {
                    let line = display::result_line(result);
                    if let Some(mut s) = spinner.take() {
                        if result.passed() {
                            s.finish_success(&line);
                        } else {
                            s.finish_error(&line);
                        }
                    }
                    if verbose {
                        display::show_analysis(ui, result);
                    }
                }
            }
        })?;

        let report_path = orchestrator.store().report_path(&report);

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            display::show_report(ui, &report);
            ui.show_hint(&format!(
                "Finished in {} · report: {}",
                format_duration(started.elapsed()),
                report_path.display()
            ));
        }

        let exit_code = report.exit_code();
        if !json {
            if exit_code == 0 {
                ui.success(&format!(
                    "{} of {} repositories cloned, {} policy met",
                    report.successful_clones, report.total_repos, report.exit_policy
                ));
            } else {
                ui.error(&format!(
                    "Clone success rate {:.1}% is below the {} policy",
                    report.success_rate, report.exit_policy
                ));
            }
        }

        Ok(CommandResult::from_exit_code(exit_code))
    }
}
