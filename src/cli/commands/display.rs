//! Shared rendering of analysis results and reports.

use crate::detection::{DependencySet, Ecosystem};
use crate::harness::{AnalysisResult, Report};
use crate::ui::UserInterface;

/// `python, node (package.json)`-style list of detected ecosystems.
pub fn dependency_list(deps: &DependencySet) -> String {
    let mut names: Vec<String> = deps
        .detected()
        .into_iter()
        .map(|e| e.key().to_string())
        .collect();
    names.extend(deps.other.iter().cloned());

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// "PASS"/"FAIL" marker used in summaries.
pub fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// One-line outcome for a repository.
pub fn result_line(result: &AnalysisResult) -> String {
    match &result.failure {
        None => result.repo.clone(),
        Some(failure) => format!("{} ({}: {})", result.repo, failure.stage, failure.reason),
    }
}

/// Stage-by-stage detail for one repository.
pub fn show_analysis(ui: &mut dyn UserInterface, result: &AnalysisResult) {
    ui.message(&format!("  {}:", result.repo));
    ui.message(&format!("    Clone: {}", pass_fail(result.cloned())));
    ui.message(&format!(
        "    README: {}{}",
        pass_fail(result.readme_found()),
        result
            .readme
            .source
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default()
    ));

    if let Some(deps) = &result.dependencies {
        ui.message(&format!("    Dependencies: {}", dependency_list(deps)));
    }

    if let Some(plan) = &result.action_plan {
        for ecosystem in Ecosystem::INSTALLABLE {
            if result
                .dependencies
                .as_ref()
                .is_some_and(|d| d.has(ecosystem))
            {
                if let Some(cmd) = plan.dependencies.get(ecosystem) {
                    ui.message(&format!("    Install ({}): {}", ecosystem.label(), cmd));
                }
            }
        }
        if plan.run_commands.is_empty() {
            ui.message("    Run commands: none found");
        } else {
            ui.message("    Run commands:");
            for cmd in &plan.run_commands {
                ui.message(&format!("      - {}", cmd));
            }
        }
        for note in &plan.dry_run_notes {
            ui.show_hint(&format!("    {}", note));
        }
    }

    if let Some(verdict) = &result.planner {
        match (&verdict.response, &verdict.failure_message) {
            (Some(response), _) => ui.message(&format!(
                "    Planner ({}): install `{}`, run `{}`",
                verdict.planner, response.install, response.run
            )),
            (None, Some(message)) => {
                ui.warning(&format!("    Planner ({}): {}", verdict.planner, message))
            }
            (None, None) => {}
        }
    }

    if let Some(failure) = &result.failure {
        ui.warning(&format!("    Stopped at {}: {}", failure.stage, failure.reason));
    }
}

/// Aggregate numbers, dependency counts and failure modes.
pub fn show_report(ui: &mut dyn UserInterface, report: &Report) {
    ui.show_header("runthis harness report");
    ui.message(&format!(
        "Timestamp: {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    ui.message(&format!("Total repos: {}", report.total_repos));
    ui.message(&format!("Successful clones: {}", report.successful_clones));
    ui.message(&format!("Successful README reads: {}", report.successful_reads));
    ui.message(&format!("Clone success rate: {:.1}%", report.success_rate));
    ui.message(&format!("Pass rate: {:.1}%", report.pass_rate));
    ui.message(&format!(
        "Average run commands found: {:.1}",
        report.summary.avg_run_commands
    ));
    ui.message(&format!(
        "Repos with detectable dependencies: {}/{}",
        report.summary.repos_with_deps, report.total_repos
    ));

    if !report.summary.most_common_deps.is_empty() {
        ui.message("");
        ui.message("Most common dependencies:");
        for dep in &report.summary.most_common_deps {
            ui.message(&format!("  - {}: {} repos", dep.ecosystem.key(), dep.count));
        }
    }

    if !report.failure_modes.is_empty() {
        ui.message("");
        ui.message("Failure modes:");
        for failure in &report.failure_modes {
            ui.warning(&format!(
                "  {} [{}]: {}",
                failure.repo, failure.stage, failure.reason
            ));
        }
    }

    ui.message("");
    ui.message(&format!("Exit policy: {}", report.exit_policy));
}
