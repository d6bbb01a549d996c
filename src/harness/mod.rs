//! The dry-run test harness.
//!
//! For each configured repository the harness runs
//! `clone -> README -> manifests -> action plan -> planner`, stopping at
//! the first failing stage, writes the result to `logs/`, and finally
//! aggregates everything into one report under `reports/`. Nothing that a
//! plan describes is ever executed.

pub mod analyzer;
pub mod orchestrator;
pub mod report;
pub mod result;
pub mod store;

pub use analyzer::Analyzer;
pub use orchestrator::{HarnessProgress, Orchestrator};
pub use report::{DependencyCount, ExitPolicy, FailureMode, Report, Summary};
pub use result::{AnalysisResult, Failure, ReadmeOutcome, Stage};
pub use store::ResultStore;
