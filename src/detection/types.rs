//! Ecosystem tags and the detected dependency set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A build/package ecosystem a manifest file points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Python,
    Node,
    Rust,
    Go,
    Cpp,
    Other,
}

impl Ecosystem {
    /// Ecosystems that get their own install command, in report order.
    pub const INSTALLABLE: [Ecosystem; 5] = [
        Ecosystem::Python,
        Ecosystem::Node,
        Ecosystem::Rust,
        Ecosystem::Go,
        Ecosystem::Cpp,
    ];

    /// Lowercase key used in JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Node => "node",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Cpp => "cpp",
            Self::Other => "other",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Node => "Node",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Cpp => "C++",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which ecosystems a repository's manifests point at.
///
/// Derived purely from file existence; never updated after detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    pub python: bool,
    pub node: bool,
    pub rust: bool,
    pub go: bool,
    pub cpp: bool,

    /// Manifests with no dedicated ecosystem (e.g. `Makefile`).
    pub other: Vec<String>,

    /// Every matched manifest filename, in detection order.
    #[serde(default)]
    pub manifests: Vec<String>,
}

impl DependencySet {
    /// Whether `ecosystem` was detected.
    pub fn has(&self, ecosystem: Ecosystem) -> bool {
        match ecosystem {
            Ecosystem::Python => self.python,
            Ecosystem::Node => self.node,
            Ecosystem::Rust => self.rust,
            Ecosystem::Go => self.go,
            Ecosystem::Cpp => self.cpp,
            Ecosystem::Other => !self.other.is_empty(),
        }
    }

    /// Record that `manifest` was found for `ecosystem`.
    pub(crate) fn mark(&mut self, ecosystem: Ecosystem, manifest: &str) {
        match ecosystem {
            Ecosystem::Python => self.python = true,
            Ecosystem::Node => self.node = true,
            Ecosystem::Rust => self.rust = true,
            Ecosystem::Go => self.go = true,
            Ecosystem::Cpp => self.cpp = true,
            Ecosystem::Other => self.other.push(manifest.to_string()),
        }
        self.manifests.push(manifest.to_string());
    }

    /// Detected ecosystems with a dedicated install command, in report order.
    pub fn detected(&self) -> Vec<Ecosystem> {
        Ecosystem::INSTALLABLE
            .into_iter()
            .filter(|e| self.has(*e))
            .collect()
    }

    /// True when no manifest of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}
