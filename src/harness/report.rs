//! Aggregate statistics over a batch of analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::result::{AnalysisResult, Stage};
use crate::config::ExitPolicyKind;
use crate::detection::Ecosystem;

/// How a finished batch maps to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Exit 0 no matter what failed.
    AlwaysSucceed,
    /// Exit 0 iff the clone success rate reaches this percentage.
    Threshold(f64),
}

impl ExitPolicy {
    pub fn from_kind(kind: ExitPolicyKind, threshold: f64) -> Self {
        match kind {
            ExitPolicyKind::AlwaysSucceed => ExitPolicy::AlwaysSucceed,
            ExitPolicyKind::Threshold => ExitPolicy::Threshold(threshold),
        }
    }

    /// Exit code for a batch with the given clone success rate.
    pub fn exit_code(&self, success_rate: f64) -> i32 {
        match self {
            ExitPolicy::AlwaysSucceed => 0,
            ExitPolicy::Threshold(min) if success_rate >= *min => 0,
            ExitPolicy::Threshold(_) => 1,
        }
    }
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitPolicy::AlwaysSucceed => f.write_str("always-succeed"),
            ExitPolicy::Threshold(min) => write!(f, "threshold ({:.1}%)", min),
        }
    }
}

/// A repository that stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMode {
    pub repo: String,
    pub stage: Stage,
    pub reason: String,
}

/// How many repositories used an ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCount {
    pub ecosystem: Ecosystem,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Installable ecosystems by repository count, most common first.
    pub most_common_deps: Vec<DependencyCount>,
    /// Run-command candidates per repository, over all repositories.
    pub avg_run_commands: f64,
    /// Repositories with at least one manifest.
    pub repos_with_deps: usize,
}

/// The aggregate report for one harness run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub total_repos: usize,
    pub successful_clones: usize,
    pub successful_reads: usize,
    pub failures: usize,
    /// Percentage of repositories that cloned.
    pub success_rate: f64,
    /// Percentage of repositories that passed every stage.
    pub pass_rate: f64,
    pub exit_policy: ExitPolicy,
    pub failure_modes: Vec<FailureMode>,
    pub summary: Summary,
    pub results: Vec<AnalysisResult>,
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        // Scale before dividing so whole percentages stay exact.
        part as f64 * 100.0 / total as f64
    }
}

fn count_dependencies(results: &[AnalysisResult]) -> Vec<DependencyCount> {
    let mut counts: Vec<DependencyCount> = Ecosystem::INSTALLABLE
        .iter()
        .map(|&ecosystem| DependencyCount {
            ecosystem,
            count: results
                .iter()
                .filter_map(|r| r.dependencies.as_ref())
                .filter(|d| d.has(ecosystem))
                .count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    // Stable: ties keep table order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

impl Report {
    /// Aggregate `results` in one pass.
    pub fn build(results: Vec<AnalysisResult>, exit_policy: ExitPolicy) -> Self {
        let total = results.len();
        let successful_clones = results.iter().filter(|r| r.cloned()).count();
        let successful_reads = results.iter().filter(|r| r.readme_found()).count();

        let failure_modes: Vec<FailureMode> = results
            .iter()
            .filter_map(|r| {
                r.failure.as_ref().map(|f| FailureMode {
                    repo: r.repo.clone(),
                    stage: f.stage,
                    reason: f.reason.clone(),
                })
            })
            .collect();
        let failures = failure_modes.len();

        let run_commands: usize = results.iter().map(|r| r.run_command_count()).sum();
        let avg_run_commands = if total == 0 {
            0.0
        } else {
            run_commands as f64 / total as f64
        };

        let summary = Summary {
            most_common_deps: count_dependencies(&results),
            avg_run_commands,
            repos_with_deps: results
                .iter()
                .filter(|r| r.dependencies.as_ref().is_some_and(|d| !d.is_empty()))
                .count(),
        };

        Self {
            timestamp: Utc::now(),
            total_repos: total,
            successful_clones,
            successful_reads,
            failures,
            success_rate: percent(successful_clones, total),
            pass_rate: percent(total - failures, total),
            exit_policy,
            failure_modes,
            summary,
            results,
        }
    }

    /// Exit code under this report's policy.
    pub fn exit_code(&self) -> i32 {
        self.exit_policy.exit_code(self.success_rate)
    }
}
