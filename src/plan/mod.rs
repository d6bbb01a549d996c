//! Action plan generation from manifests and README text.

pub mod action;
pub mod extract;

pub use action::{
    install_command, no_deps_placeholder, ActionPlan, ActionPlanGenerator, InstallCommands,
    DEFAULT_MAX_RUN_COMMANDS,
};
pub use extract::{
    looks_runnable, ExtractorKind, FencedBlockExtractor, KeywordExtractor, RunCommandExtractor,
};
