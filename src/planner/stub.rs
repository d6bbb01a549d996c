//! Deterministic planner.

use super::{PlanRequest, PlanResponse, Planner, PlannerError};
use crate::detection::Ecosystem;
use crate::plan::install_command;

/// Answers from a fixed table keyed on the first detected ecosystem.
///
/// Fails with [`PlannerError::Undetermined`] when no manifest was found,
/// mirroring what a real model says for a README with no instructions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPlanner;

fn default_run(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Python => "python main.py",
        Ecosystem::Node => "npm start",
        Ecosystem::Rust => "cargo run",
        Ecosystem::Go => "go run .",
        Ecosystem::Cpp | Ecosystem::Other => "make run",
    }
}

impl Planner for StubPlanner {
    fn name(&self) -> &str {
        "stub"
    }

    fn plan(&self, request: &PlanRequest<'_>) -> Result<PlanResponse, PlannerError> {
        if request.dependencies.is_empty() {
            return Err(PlannerError::undetermined());
        }

        let ecosystem = request
            .dependencies
            .detected()
            .first()
            .copied()
            .unwrap_or(Ecosystem::Other);

        let language = if request.repo.language.is_empty() {
            ecosystem.key().to_string()
        } else {
            request.repo.language.to_lowercase()
        };

        let run = request
            .run_commands
            .first()
            .cloned()
            .unwrap_or_else(|| default_run(ecosystem).to_string());

        Ok(PlanResponse {
            language,
            install: install_command(ecosystem).to_string(),
            run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DependencySet;
    use crate::fetch::RepositorySpec;

    fn request<'a>(
        repo: &'a RepositorySpec,
        deps: &'a DependencySet,
        run_commands: &'a [String],
    ) -> PlanRequest<'a> {
        PlanRequest {
            repo,
            readme: "",
            dependencies: deps,
            run_commands,
        }
    }

    #[test]
    fn no_manifests_is_undetermined() {
        let repo = RepositorySpec::new("octo/cat", "Python");
        let deps = DependencySet::default();

        let err = StubPlanner.plan(&request(&repo, &deps, &[])).unwrap_err();

        assert!(matches!(err, PlannerError::Undetermined { .. }));
    }

    #[test]
    fn python_defaults() {
        let repo = RepositorySpec::new("octo/cat", "Python");
        let deps = DependencySet {
            python: true,
            manifests: vec!["requirements.txt".to_string()],
            ..Default::default()
        };

        let plan = StubPlanner.plan(&request(&repo, &deps, &[])).unwrap();

        assert_eq!(plan.language, "python");
        assert_eq!(plan.install, "pip install -r requirements.txt");
        assert_eq!(plan.run, "python main.py");
    }

    #[test]
    fn readme_candidate_wins_over_default_run() {
        let repo = RepositorySpec::new("octo/cat", "");
        let deps = DependencySet {
            node: true,
            manifests: vec!["package.json".to_string()],
            ..Default::default()
        };
        let commands = vec!["npm run dev".to_string()];

        let plan = StubPlanner.plan(&request(&repo, &deps, &commands)).unwrap();

        assert_eq!(plan.language, "node");
        assert_eq!(plan.install, "npm install");
        assert_eq!(plan.run, "npm run dev");
    }

    #[test]
    fn makefile_only_falls_back_to_make() {
        let repo = RepositorySpec::new("octo/cat", "C");
        let deps = DependencySet {
            other: vec!["Makefile".to_string()],
            manifests: vec!["Makefile".to_string()],
            ..Default::default()
        };

        let plan = StubPlanner.plan(&request(&repo, &deps, &[])).unwrap();

        assert_eq!(plan.install, "make");
        assert_eq!(plan.run, "make run");
    }

    #[test]
    fn same_input_same_answer() {
        let repo = RepositorySpec::new("octo/cat", "Rust");
        let deps = DependencySet {
            rust: true,
            manifests: vec!["Cargo.toml".to_string()],
            ..Default::default()
        };

        let a = StubPlanner.plan(&request(&repo, &deps, &[])).unwrap();
        let b = StubPlanner.plan(&request(&repo, &deps, &[])).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.run, "cargo run");
    }
}
