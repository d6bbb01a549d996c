//! Run-command extraction from README text.
//!
//! Extraction is a pure `&str -> Vec<String>` strategy behind the
//! [`RunCommandExtractor`] trait, so the heuristic can be swapped without
//! touching plan generation or the harness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Substrings that suggest a line mentions a runnable command.
pub const COMMAND_HINTS: &[&str] = &["npm run", "npm start", "python", "cargo run", "make", "./"];

/// Substrings that suggest the command runs, starts or builds something.
pub const ACTION_WORDS: &[&str] = &["run", "start", "build"];

/// Turns README text into run-command candidates, in first-seen order.
pub trait RunCommandExtractor {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Extract every candidate from `readme`. Callers truncate.
    fn extract(&self, readme: &str) -> Vec<String>;
}

/// Whether a line mentions a command hint together with an action word.
pub fn looks_runnable(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    COMMAND_HINTS.iter().any(|hint| lower.contains(hint))
        && ACTION_WORDS.iter().any(|word| lower.contains(word))
}

/// Trim whitespace and surrounding backticks; reject comment-like lines.
fn clean_candidate(line: &str) -> Option<String> {
    let cmd = line.trim().trim_matches('`').trim();
    if cmd.is_empty() || cmd.starts_with('#') || cmd.starts_with("<!--") {
        None
    } else {
        Some(cmd.to_string())
    }
}

/// Line-by-line keyword matching over the whole README.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl RunCommandExtractor for KeywordExtractor {
    fn name(&self) -> &str {
        "keyword"
    }

    fn extract(&self, readme: &str) -> Vec<String> {
        readme
            .lines()
            .filter(|line| looks_runnable(line))
            .filter_map(clean_candidate)
            .collect()
    }
}

/// Keyword matching restricted to fenced code blocks.
///
/// Shell prompts (`$ `) are stripped so `$ npm start` yields `npm start`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlockExtractor;

impl RunCommandExtractor for FencedBlockExtractor {
    fn name(&self) -> &str {
        "fenced"
    }

    fn extract(&self, readme: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        let mut fence: Option<&str> = None;

        for line in readme.lines() {
            let trimmed = line.trim();

            match fence {
                None => {
                    if trimmed.starts_with("```") {
                        fence = Some("```");
                    } else if trimmed.starts_with("~~~") {
                        fence = Some("~~~");
                    }
                }
                Some(marker) if trimmed.starts_with(marker) => fence = None,
                Some(_) => {
                    let body = trimmed.strip_prefix("$ ").unwrap_or(trimmed);
                    if looks_runnable(body) {
                        if let Some(cmd) = clean_candidate(body) {
                            candidates.push(cmd);
                        }
                    }
                }
            }
        }

        candidates
    }
}

/// Selects a built-in extractor from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Keyword,
    Fenced,
}

impl ExtractorKind {
    /// Instantiate the extractor.
    pub fn build(&self) -> Box<dyn RunCommandExtractor> {
        match self {
            Self::Keyword => Box::new(KeywordExtractor),
            Self::Fenced => Box::new(FencedBlockExtractor),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "fenced" => Ok(Self::Fenced),
            _ => Err(format!("unknown extractor: {} (expected keyword or fenced)", s)),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword => f.write_str("keyword"),
            Self::Fenced => f.write_str("fenced"),
        }
    }
}
