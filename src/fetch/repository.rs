//! Repository identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{Result, RunthisError};

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").unwrap());

/// A repository to analyze, as listed in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySpec {
    /// Identifier of the form `owner/name`.
    pub name: String,

    /// Declared primary language (display only).
    #[serde(default)]
    pub language: String,
}

impl RepositorySpec {
    /// Create a spec without validating the identifier.
    pub fn new(name: &str, language: &str) -> Self {
        Self {
            name: name.to_string(),
            language: language.to_string(),
        }
    }

    /// Parse and validate an `owner/name` identifier.
    pub fn parse(name: &str) -> Result<Self> {
        let spec = Self::new(name.trim(), "");
        spec.validate()?;
        Ok(spec)
    }

    /// Check that the identifier is `owner/name` with no path tricks.
    pub fn validate(&self) -> Result<()> {
        if is_valid_identifier(&self.name) {
            Ok(())
        } else {
            Err(RunthisError::InvalidRepository {
                name: self.name.clone(),
            })
        }
    }

    /// Filesystem-safe name, slashes replaced with underscores.
    pub fn slug(&self) -> String {
        self.name.replace('/', "_")
    }

    /// The owner half of the identifier.
    pub fn owner(&self) -> &str {
        self.name.split('/').next().unwrap_or_default()
    }

    /// The repository half of the identifier.
    pub fn repo(&self) -> &str {
        self.name.split('/').nth(1).unwrap_or_default()
    }
}

/// Whether `name` looks like `owner/name`.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name) && !name.split('/').any(|part| part == "." || part == "..")
}

/// The trending sample the harness uses when no repositories are configured.
pub fn default_repositories() -> Vec<RepositorySpec> {
    [
        ("alibaba/zvec", "C++"),
        ("nautechsystems/nautilus_trader", "Rust"),
        ("rowboatlabs/rowboat", "TypeScript"),
        ("steipete/gogcli", "Go"),
        ("openclaw/openclaw", "TypeScript"),
        ("SynkraAI/aios-core", "JavaScript"),
        ("letta-ai/letta-code", "TypeScript"),
        ("ruvnet/wifi-densepose", "Python"),
        ("seerr-team/seerr", "TypeScript"),
        ("hummingbot/hummingbot", "Python"),
    ]
    .into_iter()
    .map(|(name, language)| RepositorySpec::new(name, language))
    .collect()
}
